//! Wire model for the entrepreneur endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw record as returned by the row endpoint: column name to scalar value.
pub type Record = Map<String, Value>;

/// Metadata for one table column.
///
/// The variables endpoint forwards Census variable metadata, so payloads may
/// carry more fields (`concept`, `predicateType`, ...). Only the key and the
/// label matter here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// API field key, unique per dataset.
    pub name: String,
    /// Human readable column title.
    pub label: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// One record of business-owner statistics.
///
/// `id` is the zero-based position in the response, not a field of the data.
/// It is only stable as long as the backend keeps its ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: usize,
    values: Record,
}

impl Row {
    /// Build a row at `index`, overwriting any `id` key in the raw record.
    pub fn new(index: usize, mut values: Record) -> Self {
        values.insert("id".to_string(), Value::from(index));
        Self { id: index, values }
    }

    /// Assign synthetic ids by position.
    pub fn from_records(records: Vec<Record>) -> Vec<Self> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Self::new(index, record))
            .collect()
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Display text for the cell under `column`; missing cells are empty.
    pub fn cell_text(&self, column: &str) -> String {
        self.get(column).map(display_value).unwrap_or_default()
    }
}

/// Render a scalar the way the grid shows it.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
