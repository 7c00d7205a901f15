//! Two-phase table load: columns first, then the records for those columns.
//!
//! The load runs as one task on a tokio runtime and reports progress through a
//! `flume` channel as [`LoadEvent`]s. The row request is built from the
//! column names, so it is only issued once the column response has arrived.
//! Dropping the [`TableLoad`] handle cancels the task.

use std::sync::Arc;

use flume::{Receiver, Sender};
use log::{debug, error, info};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::http::HttpError;
use crate::models::{ColumnDescriptor, Row};
use crate::source::EntrepreneurSource;

/// Why a table load failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("unable to grab the table columns: {0}")]
    Variables(HttpError),
    #[error("unable to grab the table records: {0}")]
    Rows(HttpError),
}

/// Progress reported by a running load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    Headers(Vec<ColumnDescriptor>),
    Rows(Vec<Row>),
    Failed(LoadError),
}

type Notify = Arc<dyn Fn() + Send + Sync>;

/// Sends events to the widget and wakes it up.
struct Publisher {
    sender: Sender<LoadEvent>,
    notify: Notify,
}

impl Publisher {
    fn publish(&self, event: LoadEvent) {
        // A closed channel means the widget is gone; nothing to wake.
        if self.sender.send(event).is_ok() {
            (self.notify)();
        }
    }
}

async fn run_load(
    source: &dyn EntrepreneurSource,
    year: u16,
    publisher: &Publisher,
) -> Result<(), LoadError> {
    let columns = source.variables(year).await.map_err(LoadError::Variables)?;
    info!("Received {} table columns for {year}", columns.len());

    let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
    publisher.publish(LoadEvent::Headers(columns));

    let records = source
        .records(year, &names)
        .await
        .map_err(LoadError::Rows)?;
    info!("Received {} table records for {year}", records.len());

    publisher.publish(LoadEvent::Rows(Row::from_records(records)));
    Ok(())
}

/// Handle to one running table load.
#[derive(Debug)]
pub struct TableLoad {
    events: Receiver<LoadEvent>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl TableLoad {
    /// Start loading `year` from `source` on `runtime`.
    ///
    /// `notify` is called after every event is queued, so the caller can
    /// schedule a redraw.
    pub fn spawn(
        source: Arc<dyn EntrepreneurSource>,
        year: u16,
        runtime: &Handle,
        notify: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        let (sender, events) = flume::unbounded();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let publisher = Publisher {
            sender,
            notify: Arc::new(notify),
        };

        let task = runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Table load for {year} cancelled");
                }
                result = run_load(source.as_ref(), year, &publisher) => {
                    if let Err(err) = result {
                        error!("{err}");
                        publisher.publish(LoadEvent::Failed(err));
                    }
                }
            }
        });

        Self {
            events,
            cancel,
            task,
        }
    }

    /// Events queued since the last call, in order.
    pub fn drain(&self) -> Vec<LoadEvent> {
        self.events.try_iter().collect()
    }

    /// True once the task has stopped and every event has been drained.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished() && self.events.is_empty()
    }
}

impl Drop for TableLoad {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::HttpResult;
    use crate::models::Record;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// In-memory source that records the calls it receives.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedSource {
        pub columns: Option<Vec<ColumnDescriptor>>,
        pub records: Option<Vec<Record>>,
        pub delay: Option<Duration>,
        pub calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EntrepreneurSource for ScriptedSource {
        async fn variables(&self, year: u16) -> HttpResult<Vec<ColumnDescriptor>> {
            self.calls.lock().unwrap().push(format!("variables/{year}"));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.columns
                .clone()
                .ok_or_else(|| HttpError::Request("connection refused".to_string()))
        }

        async fn records(&self, year: u16, headers: &[String]) -> HttpResult<Vec<Record>> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("records/{year}?{}", headers.join(",")));
            self.records.clone().ok_or(HttpError::Status {
                status: 500,
                url: format!("entrepreneur/{year}"),
            })
        }
    }

    fn scenario_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("age", "Age"),
            ColumnDescriptor::new("rev", "Revenue"),
        ]
    }

    fn scenario_records() -> Vec<Record> {
        let value = json!([{"age": 34, "rev": 1000}, {"age": 51, "rev": 2000}]);
        serde_json::from_value(value).unwrap()
    }

    async fn wait_until_finished(load: &TableLoad) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        for _ in 0..100 {
            events.extend(load.drain());
            if load.is_finished() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        events
    }

    #[test]
    fn test_error_message_names_the_cause_once() {
        let err = LoadError::Rows(HttpError::Request("connection reset".to_string()));

        assert_eq!(
            err.to_string(),
            "unable to grab the table records: request failed: connection reset"
        );
        assert!(std::error::Error::source(&err).is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_headers_then_rows_in_order() {
        let source = Arc::new(ScriptedSource {
            columns: Some(scenario_columns()),
            records: Some(scenario_records()),
            ..Default::default()
        });

        let load = TableLoad::spawn(source.clone(), 2016, &Handle::current(), || {});
        let events = wait_until_finished(&load).await;

        assert_eq!(
            *source.calls.lock().unwrap(),
            vec!["variables/2016".to_string(), "records/2016?age,rev".to_string()]
        );
        assert_eq!(events.len(), 2, "expected headers and rows: {events:?}");
        assert_eq!(events[0], LoadEvent::Headers(scenario_columns()));
        match &events[1] {
            LoadEvent::Rows(rows) => {
                assert_eq!(rows[0].id, 0);
                assert_eq!(rows[0].get("age"), Some(&json!(34)));
                assert_eq!(rows[1].id, 1);
                assert_eq!(rows[1].get("rev"), Some(&json!(2000)));
            }
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_columns_skip_row_request() {
        let source = Arc::new(ScriptedSource::default());

        let load = TableLoad::spawn(source.clone(), 2016, &Handle::current(), || {});
        let events = wait_until_finished(&load).await;

        assert_eq!(*source.calls.lock().unwrap(), vec!["variables/2016".to_string()]);
        assert!(matches!(
            events.as_slice(),
            [LoadEvent::Failed(LoadError::Variables(_))]
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_rows_keep_headers_event() {
        let source = Arc::new(ScriptedSource {
            columns: Some(scenario_columns()),
            ..Default::default()
        });

        let load = TableLoad::spawn(source, 2016, &Handle::current(), || {});
        let events = wait_until_finished(&load).await;

        assert!(matches!(
            events.as_slice(),
            [LoadEvent::Headers(_), LoadEvent::Failed(LoadError::Rows(_))]
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_notify_called_per_event() {
        let source = Arc::new(ScriptedSource {
            columns: Some(scenario_columns()),
            records: Some(scenario_records()),
            ..Default::default()
        });
        let wakeups = Arc::new(AtomicUsize::new(0));
        let counter = wakeups.clone();

        let load = TableLoad::spawn(source, 2016, &Handle::current(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        wait_until_finished(&load).await;

        assert_eq!(wakeups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_drop_cancels_before_rows() {
        let source = Arc::new(ScriptedSource {
            columns: Some(scenario_columns()),
            records: Some(scenario_records()),
            delay: Some(Duration::from_millis(200)),
            ..Default::default()
        });
        let wakeups = Arc::new(AtomicUsize::new(0));
        let counter = wakeups.clone();

        let load = TableLoad::spawn(source.clone(), 2016, &Handle::current(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(load);
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(wakeups.load(Ordering::SeqCst), 0);
        assert_eq!(*source.calls.lock().unwrap(), vec!["variables/2016".to_string()]);
    }
}
