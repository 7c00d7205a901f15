use cbo_ui::CboApp;
use cbo_ui::state::State;
use egui_kittest::Harness;
use serde_json::Value;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const VARIABLES_PATH: &str = "/entrepreneur/variables/2016";
pub const RECORDS_PATH: &str = "/entrepreneur/2016";

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, CboApp>,
}

impl<'a> TestCtx<'a> {
    /// App against a mock server whose two endpoints answer with the given
    /// templates.
    pub async fn new_app(variables: ResponseTemplate, records: ResponseTemplate) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(VARIABLES_PATH))
            .respond_with(variables)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path(RECORDS_PATH))
            .respond_with(records)
            .mount(&mock_server)
            .await;

        let state = State::test(mock_server.uri()).expect("test state should build");
        let app = CboApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    /// App answering with the business-owner scenario used across tests.
    #[allow(unused)]
    pub async fn new_scenario_app() -> Self {
        Self::new_app(json_ok(scenario_columns()), json_ok(scenario_records())).await
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, CboApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, CboApp> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Step frames while giving the load task time to finish.
    pub async fn settle(&mut self) {
        for _ in 0..20 {
            self.harness.step();
            if !self.harness.state().state.table.table().is_loading() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        self.harness.step();
    }
}

pub fn json_ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn scenario_columns() -> Value {
    serde_json::json!([
        {"name": "age", "label": "Age"},
        {"name": "rev", "label": "Revenue"}
    ])
}

pub fn scenario_records() -> Value {
    serde_json::json!([
        {"age": 34, "rev": 1000},
        {"age": 51, "rev": 2000}
    ])
}
