//! Entrepreneur statistics table.
//!
//! - `state`: widget state owning the load handle
//! - `panel`: the widget entry point and the loading/failed/loaded views
//! - `table`: grid rendering for a loaded table

mod panel;
mod state;
mod table;

pub use panel::{entrepreneur_table, table_view};
pub use state::EntrepreneurTableState;
