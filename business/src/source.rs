//! Data source for the entrepreneur endpoints.

use std::fmt::Debug;

use async_trait::async_trait;
use log::info;

use crate::http::{Client, HttpResult};
use crate::models::{ColumnDescriptor, Record};

/// Query key repeated once per column on the row request.
pub const HEADERS_QUERY_KEY: &str = "headers";

pub fn variables_path(year: u16) -> String {
    format!("entrepreneur/variables/{year}")
}

pub fn records_path(year: u16) -> String {
    format!("entrepreneur/{year}")
}

/// Where the table gets its columns and records from.
#[async_trait]
pub trait EntrepreneurSource: Send + Sync + Debug {
    /// Column metadata for the survey `year`.
    async fn variables(&self, year: u16) -> HttpResult<Vec<ColumnDescriptor>>;

    /// Records for `year`, restricted to the `headers` column names.
    async fn records(&self, year: u16, headers: &[String]) -> HttpResult<Vec<Record>>;
}

/// [`EntrepreneurSource`] backed by the REST backend.
#[derive(Debug, Clone)]
pub struct HttpEntrepreneurSource {
    client: Client,
}

impl HttpEntrepreneurSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EntrepreneurSource for HttpEntrepreneurSource {
    async fn variables(&self, year: u16) -> HttpResult<Vec<ColumnDescriptor>> {
        info!("Fetching table columns for {year}");
        self.client.get(&variables_path(year)).fetch_json().await
    }

    async fn records(&self, year: u16, headers: &[String]) -> HttpResult<Vec<Record>> {
        info!("Fetching {} columns of table records for {year}", headers.len());
        self.client
            .get(&records_path(year))
            .query_repeated(HEADERS_QUERY_KEY, headers.iter().map(String::as_str))
            .fetch_json()
            .await
    }
}
