//! Configuration for the Access client and its HTTP transport

use crate::{Error, Result};
use config::{ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API response version requested when none is configured
pub const DEFAULT_API_VERSION: &str = "0320";

/// Merchant ids must be strictly greater than this
pub const MERCHANT_ID_LOWER_BOUND: i64 = 99_999;

/// Merchant ids must be strictly less than this
pub const MERCHANT_ID_UPPER_BOUND: i64 = 1_000_000;

/// Prefix for environment variables (`ACCESS_HOST`, `ACCESS_API_KEY`, ...)
pub const ENV_PREFIX: &str = "ACCESS";

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

/// Merchant identity and target host
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Fully qualified host of the Access server (e.g. api-sandbox01.kountaccess.com)
    pub host: String,

    /// Six digit merchant number
    pub merchant_id: i64,

    /// API key issued to the merchant
    pub api_key: String,

    /// Response version tag sent as `v`
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl ClientConfig {
    /// Create config using the default API version
    pub fn new(host: impl Into<String>, merchant_id: i64, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            merchant_id,
            api_key: api_key.into(),
            api_version: default_api_version(),
        }
    }

    /// Override the API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Load from `ACCESS_*` environment variables (and `.env` if present).
    ///
    /// Missing values load as empty and are rejected later by [`ClientConfig::validate`].
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        config::Config::builder()
            .set_default("host", "")?
            .set_default("merchant_id", 0)?
            .set_default("api_key", "")?
            .set_default("api_version", DEFAULT_API_VERSION)?
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Check construction parameters, failing on the first violation.
    ///
    /// Order: host, api key present, api key non-blank, merchant id range.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::invalid("Missing host"));
        }

        if self.api_key.is_empty() {
            return Err(Error::invalid("Missing apiKey"));
        }

        if self.api_key.trim().is_empty() {
            return Err(Error::invalid(format!("Invalid apiKey({})", self.api_key)));
        }

        if self.merchant_id <= MERCHANT_ID_LOWER_BOUND || self.merchant_id >= MERCHANT_ID_UPPER_BOUND {
            return Err(Error::invalid(format!(
                "Invalid merchantId ({}). Must be between {} and {}",
                self.merchant_id,
                MERCHANT_ID_LOWER_BOUND + 1,
                MERCHANT_ID_UPPER_BOUND - 1
            )));
        }

        Ok(())
    }
}

// The api key stays out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("merchant_id", &self.merchant_id)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Settings for the default reqwest transport
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransportConfig {
    /// Whole-request timeout in seconds (0 disables it)
    pub timeout_seconds: u64,

    /// Connect timeout in seconds (0 disables it)
    pub connect_timeout_seconds: u64,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            user_agent: format!("access-sdk-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    /// Load from `ACCESS_TIMEOUT_SECONDS`, `ACCESS_CONNECT_TIMEOUT_SECONDS`, `ACCESS_USER_AGENT`
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        config::Config::builder()
            .set_default("timeout_seconds", defaults.timeout_seconds)?
            .set_default("connect_timeout_seconds", defaults.connect_timeout_seconds)?
            .set_default("user_agent", defaults.user_agent)?
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }
}
