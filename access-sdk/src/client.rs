//! Access API client

use crate::config::{ClientConfig, TransportConfig};
use crate::document::ResponseDocument;
use crate::hashing::authorization_header;
use crate::params::RequestParameters;
use crate::transport::{HttpMethod, HttpRequest, HttpTransport, ReqwestTransport, TransportError};
use crate::types::{Endpoints, InfoDataSet};
use crate::validation::{
    verify_device_id, verify_gather_info, verify_info, verify_json, verify_not_blank,
    verify_session, verify_trust_state, verify_uniq,
};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Client for the Access fraud-detection service.
///
/// Configuration and endpoints are fixed at construction. Each operation
/// validates its inputs, sends exactly one request and decodes exactly one
/// response; nothing is retried. `Ok(None)` means the server answered 200
/// with an empty body.
#[derive(Clone)]
pub struct AccessClient {
    config: ClientConfig,
    endpoints: Endpoints,
    authorization: String,
    transport: Arc<dyn HttpTransport>,
}

impl AccessClient {
    /// Create a client with the default API version and reqwest transport
    pub fn new(host: &str, merchant_id: i64, api_key: &str) -> Result<Self> {
        Self::from_config(ClientConfig::new(host, merchant_id, api_key))
    }

    /// Create a client requesting a specific API version
    pub fn with_version(host: &str, merchant_id: i64, api_key: &str, version: &str) -> Result<Self> {
        Self::from_config(ClientConfig::new(host, merchant_id, api_key).with_api_version(version))
    }

    /// Create a client from config using a default reqwest transport
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::with_transport_config(config, &TransportConfig::default())
    }

    /// Create a client from config with reqwest transport settings
    pub fn with_transport_config(config: ClientConfig, transport: &TransportConfig) -> Result<Self> {
        // Validate before touching the transport so bad input is always INVALID_DATA.
        config.validate()?;
        let transport = ReqwestTransport::new(transport).map_err(|e| Error::network(e.to_string()))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client with an injected transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        config.validate()?;

        let endpoints = Endpoints::for_host(&config.host);
        let authorization = authorization_header(config.merchant_id, &config.api_key);

        info!(
            "Access SDK using merchantId = {}, host = {}",
            config.merchant_id, config.host
        );
        debug!("velocity endpoint: {}", endpoints.velocity);
        debug!("decision endpoint: {}", endpoints.decision);
        debug!("device endpoint: {}", endpoints.device);
        debug!("device trust endpoint: {}", endpoints.device_trust);
        debug!("device info endpoint: {}", endpoints.info);

        Ok(Self {
            config,
            endpoints,
            authorization,
            transport,
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Endpoint URLs
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Merchant id
    pub fn merchant_id(&self) -> i64 {
        self.config.merchant_id
    }

    /// API version sent as `v`
    pub fn version(&self) -> &str {
        &self.config.api_version
    }

    /// Velocity counters for a session and optional credentials
    pub async fn get_velocity(
        &self,
        session: &str,
        username: Option<&str>,
        password: Option<&str>,
        additional: &[(String, String)],
    ) -> Result<Option<ResponseDocument>> {
        verify_session(session)?;

        let params = self.parameters(Some(session), username, password, additional);
        debug!("velocity request: url = {}, parameters = {}", self.endpoints.velocity, params);
        self.post(&self.endpoints.velocity, &params).await
    }

    /// Device fingerprint, IP and geo data for a session.
    ///
    /// Parameters go into the query string verbatim, without hashing or
    /// percent-encoding.
    pub async fn get_device(
        &self,
        session: &str,
        additional: &[(String, String)],
    ) -> Result<Option<ResponseDocument>> {
        verify_session(session)?;

        let mut params = RequestParameters::new();
        params.push("v", self.version());
        params.push("s", session);
        params.extend(additional);

        let url = format!("{}?{}", self.endpoints.device, params.to_literal_query());
        debug!("device info request: url = {}?{}", self.endpoints.device, params);
        self.get(url).await
    }

    /// Policy decision for a session and optional credentials
    pub async fn get_decision(
        &self,
        session: &str,
        username: Option<&str>,
        password: Option<&str>,
        additional: &[(String, String)],
    ) -> Result<Option<ResponseDocument>> {
        verify_session(session)?;

        let params = self.parameters(Some(session), username, password, additional);
        debug!("decision request: url = {}, parameters = {}", self.endpoints.decision, params);
        self.post(&self.endpoints.decision, &params).await
    }

    /// Set the trust state of a device.
    ///
    /// Checks trust state, then uniq, then device id. `ts` carries the trust
    /// state exactly as given.
    pub async fn set_device_trust(
        &self,
        username: Option<&str>,
        password: Option<&str>,
        device_id: &str,
        uniq: &str,
        trust_state: &str,
        additional: &[(String, String)],
    ) -> Result<Option<ResponseDocument>> {
        verify_trust_state(trust_state)?;
        verify_uniq(uniq)?;
        verify_device_id(device_id)?;

        let mut params = self.parameters(None, username, password, additional);
        params.push("ts", trust_state);

        debug!("device trust request: url = {}, parameters = {}", self.endpoints.device_trust, params);
        self.post(&self.endpoints.device_trust, &params).await
    }

    /// Set the trust state of a device without credentials
    pub async fn set_device_trust_by_device(
        &self,
        device_id: &str,
        uniq: &str,
        trust_state: &str,
        additional: &[(String, String)],
    ) -> Result<Option<ResponseDocument>> {
        self.set_device_trust(None, None, device_id, uniq, trust_state, additional)
            .await
    }

    /// Set the trust state of the device seen in a session
    pub async fn set_device_trust_by_session(
        &self,
        session: &str,
        uniq: &str,
        trust_state: &str,
        additional: &[(String, String)],
    ) -> Result<Option<ResponseDocument>> {
        verify_trust_state(trust_state)?;
        verify_uniq(uniq)?;
        verify_session(session)?;

        let mut params = self.parameters(Some(session), None, None, additional);
        params.push("uniq", uniq);
        params.push("ts", trust_state);

        debug!("device trust request: url = {}, parameters = {}", self.endpoints.device_trust, params);
        self.post(&self.endpoints.device_trust, &params).await
    }

    /// Multiplexed device information selected by `return_value`.
    ///
    /// `return_value` is a 1..=15 bitmask: 1 device info, 2 velocity,
    /// 4 threshold, 8 trusted state. `uniq` is required when bit 8 is set.
    #[allow(clippy::too_many_arguments)]
    pub async fn gather_device_info(
        &self,
        session: &str,
        username: Option<&str>,
        password: Option<&str>,
        return_value: i64,
        device_id: &str,
        uniq: Option<&str>,
        additional: &[(String, String)],
    ) -> Result<Option<ResponseDocument>> {
        verify_gather_info(session, return_value, device_id, uniq)?;

        let params = self.parameters(Some(session), username, password, additional);
        debug!("gather device info request: url = {}, parameters = {}", self.endpoints.info, params);
        self.post(&self.endpoints.info, &params).await
    }

    /// Info endpoint with an explicit data set (`i`).
    ///
    /// `uniq` is required when the trusted state is requested and is sent
    /// whenever it is given.
    pub async fn get_info(
        &self,
        data_set: InfoDataSet,
        session: &str,
        uniq: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
        additional: &[(String, String)],
    ) -> Result<Option<ResponseDocument>> {
        verify_info(session, data_set, uniq)?;

        let mut params = self.parameters(Some(session), username, password, additional);
        params.push("i", data_set.build().to_string());
        if let Some(uniq) = uniq {
            params.push("uniq", uniq);
        }

        debug!("info request: url = {}, parameters = {}", self.endpoints.info, params);
        self.post(&self.endpoints.info, &params).await
    }

    /// Submit behavioural timing data to a BehavioSec host.
    ///
    /// Posts to `https://{behavio_host}/{environment}/behavio/data`.
    pub async fn set_behavior_data(
        &self,
        behavio_host: &str,
        environment: &str,
        session: &str,
        timing: &str,
        uniq: &str,
    ) -> Result<Option<ResponseDocument>> {
        verify_not_blank("behavioHost", behavio_host)?;
        verify_not_blank("environment", environment)?;
        verify_not_blank("session", session)?;
        verify_session(session)?;
        verify_not_blank("timing", timing)?;
        verify_json("timing", timing)?;
        verify_not_blank("uniq", uniq)?;

        let url = format!("https://{}/{}/behavio/data", behavio_host.trim(), environment.trim());

        let mut params = RequestParameters::new();
        params.push("m", self.merchant_id().to_string());
        params.push("s", session);
        params.push("timing", timing);
        params.push("uniq", uniq);

        debug!("behavio data request: url = {}, parameters = {}", url, params);
        self.post(&url, &params).await
    }

    /// Alias of [`AccessClient::get_device`]
    #[deprecated(note = "use get_device")]
    pub async fn get_device_info(&self, session: &str) -> Result<Option<ResponseDocument>> {
        self.get_device(session, &[]).await
    }

    /// Alias of [`AccessClient::get_velocity`]
    #[deprecated(note = "use get_velocity")]
    pub async fn get_access_data(
        &self,
        session: &str,
        username: Option<&str>,
        password: Option<&str>,
        additional: &[(String, String)],
    ) -> Result<Option<ResponseDocument>> {
        self.get_velocity(session, username, password, additional).await
    }

    fn parameters(
        &self,
        session: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
        additional: &[(String, String)],
    ) -> RequestParameters {
        RequestParameters::build(self.version(), session, username, password, additional)
    }

    async fn get(&self, url: String) -> Result<Option<ResponseDocument>> {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![("Authorization".to_string(), self.authorization.clone())],
            body: None,
        };
        self.send(request).await
    }

    async fn post(&self, url: &str, params: &RequestParameters) -> Result<Option<ResponseDocument>> {
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: vec![
                ("Authorization".to_string(), self.authorization.clone()),
                ("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()),
            ],
            body: Some(params.to_form_body()),
        };
        self.send(request).await
    }

    async fn send(&self, request: HttpRequest) -> Result<Option<ResponseDocument>> {
        let url = request.url.clone();
        let method = request.method;

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| classify_transport_error(e, &url))?;

        if response.status != 200 {
            warn!("{} {} returned {} {}", method, url, response.status, response.reason);
            return Err(Error::network(format!(
                "Bad Response({}) {} {}",
                response.status, response.reason, url
            )));
        }

        decode_body(response.body)
    }
}

impl fmt::Debug for AccessClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessClient")
            .field("config", &self.config)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

fn classify_transport_error(err: TransportError, url: &str) -> Error {
    warn!("request to {} failed: {}", url, err);
    match err {
        TransportError::UnknownHost(_) => Error::network(format!("UNKNOWN HOST({})", url)),
        TransportError::InvalidUrl(_) => Error::invalid(format!("BAD URL({})", url)),
        TransportError::Io(_) => Error::network("UNKNOWN NETWORK ISSUE, try again later"),
    }
}

fn decode_body(body: Option<String>) -> Result<Option<ResponseDocument>> {
    match body {
        Some(body) if !body.trim().is_empty() => ResponseDocument::parse(&body).map(Some),
        _ => Ok(None),
    }
}
