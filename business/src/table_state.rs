//! State of the entrepreneur table, driven by [`LoadEvent`]s.

use log::warn;

use crate::loader::LoadEvent;
use crate::models::{ColumnDescriptor, Row};

/// Lifecycle phase of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct TableState {
    headers: Vec<ColumnDescriptor>,
    rows: Vec<Row>,
    status: LoadStatus,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &[ColumnDescriptor] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Fold one event into the state.
    ///
    /// Events arriving after the load settled are dropped.
    pub fn apply(&mut self, event: LoadEvent) {
        if !self.is_loading() {
            warn!("Ignoring table event after load settled: {event:?}");
            return;
        }
        match event {
            LoadEvent::Headers(headers) => self.headers = headers,
            LoadEvent::Rows(rows) => {
                self.rows = rows;
                self.status = LoadStatus::Loaded;
            }
            LoadEvent::Failed(err) => self.status = LoadStatus::Failed(err.to_string()),
        }
    }
}
