//! Business logic for the Characteristics of Business Owners viewer:
//! configuration, HTTP client, wire model and the two-phase table load.

pub mod config;
pub mod http;
pub mod loader;
pub mod models;
pub mod source;
pub mod table_state;

pub use config::{Config, DEFAULT_SURVEY_YEAR};
pub use http::{Client, ClientConfig, HttpError, HttpResult};
pub use loader::{LoadError, LoadEvent, TableLoad};
pub use models::{ColumnDescriptor, Record, Row, display_value};
pub use source::{EntrepreneurSource, HttpEntrepreneurSource};
pub use table_state::{LoadStatus, TableState};
