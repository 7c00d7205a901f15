//! HTTP client built from an immutable [`ClientConfig`].
//!
//! The configuration (base URL, default POST headers, optional timeout) is
//! constructed once at start-up and shared by every request issued through a
//! [`Client`]. Nothing here is process-global: tests build their own client
//! pointed at a mock server.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Content type sent by default with POST requests.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// HTTP method for requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Immutable request defaults shared by every request of a [`Client`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    post_headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Defaults for a backend living at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            post_headers: vec![("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())],
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn post_headers(&self) -> &[(String, String)] {
        &self.post_headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Resolve `path` against the base URL with exactly one `/` between them.
    pub fn url(&self, path: &str) -> HttpResult<String> {
        let base = self.base_url.trim_end_matches('/');
        if base.is_empty() {
            return Err(HttpError::InvalidUrl(format!(
                "no base URL configured for `{path}`"
            )));
        }
        Ok(format!("{base}/{}", path.trim_start_matches('/')))
    }
}

/// A simplified HTTP response that owns its data.
#[derive(Debug, Clone)]
pub struct Response {
    /// Request URL, kept for error messages
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into [`HttpError::Status`].
    pub fn error_for_status(self) -> HttpResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(HttpError::Status {
                status: self.status,
                url: self.url,
            })
        }
    }

    /// Attempt to deserialize the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> HttpResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

/// HTTP client error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },
    #[error("unable to decode response body: {0}")]
    Decode(String),
    #[error("unable to encode request body: {0}")]
    Encode(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Result type for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    fn new(client: reqwest::Client, config: Arc<ClientConfig>, method: Method, path: &str) -> Self {
        let mut headers = HashMap::new();
        if method == Method::Post {
            headers.extend(config.post_headers().iter().cloned());
        }
        Self {
            client,
            config,
            method,
            path: path.to_string(),
            query: Vec::new(),
            headers,
            body: None,
        }
    }

    /// Append `key=value` once for every value, keeping their order.
    pub fn query_repeated<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.query
            .extend(values.into_iter().map(|v| (key.to_string(), v.into())));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> HttpResult<Self> {
        let json_bytes =
            serde_json::to_vec(value).map_err(|e| HttpError::Encode(e.to_string()))?;
        self.body = Some(json_bytes);
        Ok(self)
    }

    /// Query pairs in the order they will be sent.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Send the request.
    pub async fn send(self) -> HttpResult<Response> {
        let url = self.config.url(&self.path)?;

        let mut request = match self.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };

        if !self.query.is_empty() {
            request = request.query(&self.query);
        }

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        if let Some(body) = self.body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::Request(e.to_string()))?;

        let url = response.url().to_string();
        let status = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Request(e.to_string()))?
            .to_vec();

        Ok(Response { url, status, body })
    }

    /// Send the request, reject non-2xx statuses and decode the JSON body.
    pub async fn fetch_json<T: serde::de::DeserializeOwned>(self) -> HttpResult<T> {
        self.send().await?.error_for_status()?.json()
    }
}

/// HTTP client bound to one [`ClientConfig`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Client {
    inner: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl Client {
    pub fn new(config: ClientConfig) -> HttpResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let inner = builder
            .build()
            .map_err(|e| HttpError::Request(e.to_string()))?;
        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Create a GET request for a path relative to the base URL.
    pub fn get(&self, path: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.clone(), self.config.clone(), Method::Get, path)
    }

    /// Create a POST request for a path relative to the base URL.
    pub fn post(&self, path: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.clone(), self.config.clone(), Method::Post, path)
    }
}
