//! Shared fixtures for client tests

#![allow(dead_code)]

use access_sdk::{
    AccessClient, ClientConfig, HttpRequest, HttpResponse, HttpTransport, TransportError,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub const MERCHANT_ID: i64 = 999_999;
pub const HOST: &str = "999999.kountaccess.com";
pub const API_KEY: &str = "validkey";
pub const SESSION: &str = "askhjdaskdgjhagkjhasg47862345shg";
pub const DEVICE_ID: &str = "75012bd5e5b264c4b324f5c95a769541";
pub const UNIQ: &str = "customer identifier";

/// Transport that replays one canned outcome and records every request
pub struct MockTransport {
    outcome: Result<HttpResponse, TransportError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn responding(response: HttpResponse) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(response),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: TransportError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("transport was never called")
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.outcome.clone()
    }
}

pub fn client_with(transport: Arc<MockTransport>) -> AccessClient {
    AccessClient::with_transport(ClientConfig::new(HOST, MERCHANT_ID, API_KEY), transport).unwrap()
}

/// Decode a form body into ordered pairs
pub fn form_pairs(request: &HttpRequest) -> Vec<(String, String)> {
    let body = request.body.as_deref().unwrap_or_default();
    url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect()
}

pub fn form_keys(request: &HttpRequest) -> Vec<String> {
    form_pairs(request).into_iter().map(|(k, _)| k).collect()
}

pub fn form_value(request: &HttpRequest, key: &str) -> Option<String> {
    form_pairs(request)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

pub fn extras(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub const VELOCITY_JSON: &str = r#"{"device":{"id":"7041cca3e5f94391a7a02316b0a8f384","ipAddress":"10.0.0.1","ipGeo":"BG","mobile":0,"proxy":0,"tor":0,"region":"53","country":"BG","geoLat":43.8564,"geoLong":25.9708},"response_id":"baa5211cdfbf460c967bd81d574ae353","velocity":{"account":{"dlh":1,"dlm":1,"iplh":1,"iplm":1,"plh":1,"plm":1,"ulh":1,"ulm":1},"device":{"alh":1,"alm":1,"iplh":1,"iplm":1,"plh":1,"plm":1,"ulh":2,"ulm":1}}}"#;

pub const DEVICE_JSON: &str = r#"{"device":{"id":"7041cca3e5f94391a7a02316b0a8f384","ipAddress":"10.0.0.1","ipGeo":"BG","mobile":0,"proxy":0,"tor":0,"region":"53","country":"BG","geoLat":43.8564,"geoLong":25.9708},"response_id":"baa5211cdfbf460c967bd81d574ae353"}"#;

pub const DECISION_JSON: &str = r#"{"decision":{"errors":[],"warnings":[],"reply":{"ruleEvents":{"decision":"A","total":0,"ruleEvents":null}}},"device":{"id":"7041cca3e5f94391a7a02316b0a8f384"},"response_id":"baa5211cdfbf460c967bd81d574ae353"}"#;

pub const INFO_JSON: &str = r#"{"behavioSec":{"isBot":false,"isTrained":false,"score":0,"confidence":0,"policyId":4},"decision":{"errors":[],"warnings":[],"reply":{"ruleEvents":{"decision":"A","total":0,"ruleEvents":null}}},"device":{"id":"7041cca3e5f94391a7a02316b0a8f384","ipAddress":"10.0.0.1"},"response_id":"baa5211cdfbf460c967bd81d574ae353","trusted":{"state":"banned"},"velocity":{"account":{"dlh":1},"device":{"alh":1}}}"#;
