//! Widget state for the entrepreneur table.

use std::sync::Arc;

use cbo_business::{EntrepreneurSource, TableLoad, TableState};
use log::info;
use tokio::runtime::Handle;

/// Table data plus the handle of the load feeding it.
///
/// The load starts on the first frame the widget is shown and never again.
/// Dropping this state cancels a load still in flight.
#[derive(Debug, Default)]
pub struct EntrepreneurTableState {
    table: TableState,
    load: Option<TableLoad>,
    started: bool,
}

impl EntrepreneurTableState {
    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Spawn the load unless it already ran.
    pub fn start_once(
        &mut self,
        source: Arc<dyn EntrepreneurSource>,
        year: u16,
        runtime: &Handle,
        ctx: egui::Context,
    ) {
        if self.started {
            return;
        }
        self.started = true;
        info!("Starting entrepreneur table load for {year}");
        self.load = Some(TableLoad::spawn(source, year, runtime, move || {
            ctx.request_repaint();
        }));
    }

    /// Apply everything the load published since the last frame.
    pub fn poll(&mut self) {
        let Some(load) = &self.load else {
            return;
        };
        for event in load.drain() {
            self.table.apply(event);
        }
        if load.is_finished() {
            self.load = None;
        }
    }
}
