use std::sync::Arc;

use cbo_business::{Client, Config, EntrepreneurSource, HttpEntrepreneurSource};
use tokio::runtime::Handle;

use crate::widgets::EntrepreneurTableState;

/// The main application state.
///
/// Everything the table needs to load is injected here once; nothing is read
/// from globals afterwards.
pub struct State {
    /// Where table columns and records come from.
    pub source: Arc<dyn EntrepreneurSource>,
    /// Survey year requested from the backend.
    pub survey_year: u16,
    /// Runtime the load task is spawned on.
    pub runtime: Handle,
    /// The entrepreneur table widget state.
    pub table: EntrepreneurTableState,
}

impl State {
    pub fn new(config: &Config, runtime: Handle) -> anyhow::Result<Self> {
        let client = Client::new(config.client_config())?;
        let source = Arc::new(HttpEntrepreneurSource::new(client));
        Ok(Self::with_source(source, config.survey_year(), runtime))
    }

    pub fn with_source(
        source: Arc<dyn EntrepreneurSource>,
        survey_year: u16,
        runtime: Handle,
    ) -> Self {
        Self {
            source,
            survey_year,
            runtime,
            table: EntrepreneurTableState::default(),
        }
    }

    /// State pointed at `base_url`, loading on the current tokio runtime.
    ///
    /// Must be called from within a tokio runtime.
    pub fn test(base_url: String) -> anyhow::Result<Self> {
        Self::new(&Config::new(base_url), Handle::current())
    }
}
