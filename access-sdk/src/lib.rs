//! # Access SDK
//!
//! Client for the Access fraud-detection service. A merchant backend sends
//! session, device and hashed credential fingerprints and receives device
//! reputation, velocity counters, policy decisions and trust state.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 AccessClient                 │
//! │  validation → parameters → request → decode  │
//! └──────────────────────┬───────────────────────┘
//!                        │ HttpRequest / HttpResponse
//! ┌──────────────────────▼───────────────────────┐
//! │     HttpTransport (ReqwestTransport, mocks)  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Usernames and passwords are SHA-256 hashed before they leave the process.
//! Every failure is either [`ErrorKind::InvalidData`] (fix the input) or
//! [`ErrorKind::NetworkError`] (transient; the SDK never retries).

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod hashing;
pub mod params;
pub mod transport;
pub mod types;
pub mod validation;

pub use client::AccessClient;
pub use config::{ClientConfig, TransportConfig, DEFAULT_API_VERSION};
pub use document::ResponseDocument;
pub use error::{Error, ErrorKind, Result};
pub use params::RequestParameters;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
pub use types::*;
