//! HTTP transport seam
//!
//! The client builds [`HttpRequest`] values and hands them to an
//! [`HttpTransport`]. [`ReqwestTransport`] is the production implementation;
//! tests substitute their own.

use crate::config::TransportConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// Outgoing request as plain data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Method
    pub method: HttpMethod,
    /// Absolute URL, including any query string
    pub url: String,
    /// Headers in order
    pub headers: Vec<(String, String)>,
    /// Body (POST only)
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response as plain data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Reason phrase
    pub reason: String,
    /// Body; `None` when the server sent nothing
    pub body: Option<String>,
}

impl HttpResponse {
    /// 200 with a body
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            reason: "OK".to_string(),
            body: Some(body.into()),
        }
    }

    /// 200 with no body
    pub fn empty() -> Self {
        Self {
            status: 200,
            reason: "OK".to_string(),
            body: None,
        }
    }

    /// Arbitrary status with no body
    pub fn status(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: None,
        }
    }
}

/// Transport-level failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Host name did not resolve
    #[error("Unknown host: {0}")]
    UnknownHost(String),

    /// URL or request could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other I/O failure, including timeouts
    #[error("I/O error: {0}")]
    Io(String),
}

/// Executes one HTTP exchange
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and return the full response
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport from settings
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }
        if config.connect_timeout_seconds > 0 {
            builder = builder.connect_timeout(Duration::from_secs(config.connect_timeout_seconds));
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Io(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{} ({})", request.url, e)))?;

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(classify)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body: if bytes.is_empty() {
                None
            } else {
                Some(String::from_utf8_lossy(&bytes).into_owned())
            },
        })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::InvalidUrl(err.to_string())
    } else if is_dns_failure(&err) {
        TransportError::UnknownHost(err.to_string())
    } else {
        TransportError::Io(err.to_string())
    }
}

// hyper reports resolver failures only through the error text.
fn is_dns_failure(err: &reqwest::Error) -> bool {
    let mut source = Some(err as &(dyn std::error::Error + 'static));
    while let Some(e) = source {
        let text = e.to_string().to_lowercase();
        if text.contains("dns error")
            || text.contains("failed to lookup address")
            || text.contains("no such host")
            || text.contains("name or service not known")
        {
            return true;
        }
        source = e.source();
    }
    false
}
