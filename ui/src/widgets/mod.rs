mod entrepreneur;

pub use entrepreneur::{EntrepreneurTableState, entrepreneur_table, table_view};
