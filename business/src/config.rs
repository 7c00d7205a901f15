use std::env::vars;
use std::time::Duration;

use log::info;
use serde::Deserialize;

use crate::http::ClientConfig;

/// Survey year served by the backend when nothing else is configured.
pub const DEFAULT_SURVEY_YEAR: u16 = 2016;

/// Validated client configuration, read once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    backend_api_url: String,
    survey_year: u16,
    request_timeout: Option<Duration>,
}

// Intermediate struct for deserializing environment variables.
#[derive(Deserialize)]
struct RawConfig {
    backend_api_url: Option<String>,
    survey_year: Option<u16>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Configuration pointing at `base_url` with every other value defaulted.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            backend_api_url: base_url.into(),
            survey_year: DEFAULT_SURVEY_YEAR,
            request_timeout: None,
        }
    }

    pub fn backend_api_url(&self) -> &str {
        &self.backend_api_url
    }

    pub fn survey_year(&self) -> u16 {
        self.survey_year
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Request defaults for the HTTP client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.backend_api_url.clone()).with_timeout(self.request_timeout)
    }

    /// Reads `BACKEND_API_URL`, `SURVEY_YEAR` and `REQUEST_TIMEOUT_SECS`
    /// from the process environment.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");

        let raw_config: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw_config)
    }

    fn from_raw(raw_config: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            backend_api_url,
            survey_year,
            request_timeout_secs,
        } = raw_config;

        let backend_api_url = match backend_api_url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => anyhow::bail!("BACKEND_API_URL must be set to the backend base URL"),
        };

        let survey_year = survey_year.unwrap_or_else(|| {
            info!("SURVEY_YEAR not set, defaulting to {DEFAULT_SURVEY_YEAR}");
            DEFAULT_SURVEY_YEAR
        });

        let request_timeout = match request_timeout_secs {
            Some(0) => anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than zero"),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        info!("Using backend {backend_api_url} for survey year {survey_year}");

        Ok(Self {
            backend_api_url,
            survey_year,
            request_timeout,
        })
    }
}
