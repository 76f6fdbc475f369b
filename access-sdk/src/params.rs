//! Ordered request parameters

use crate::hashing::{hash_credentials, hash_value};
use std::fmt;
use url::form_urlencoded;

/// Ordered list of form fields.
///
/// Insertion order is kept and duplicate keys are allowed; the server decides
/// precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters {
    pairs: Vec<(String, String)>,
}

impl RequestParameters {
    /// Empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard Access parameters.
    ///
    /// `v`, then `s` if a session is given, then `uh`/`ph` for non-empty
    /// credentials, then `ah` when either credential is present, then the
    /// caller's extras in order.
    pub fn build(
        version: &str,
        session: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
        additional: &[(String, String)],
    ) -> Self {
        let mut params = Self::new();
        params.push("v", version);

        if let Some(session) = session {
            params.push("s", session);
        }
        if let Some(uh) = hash_value(username) {
            params.push("uh", uh);
        }
        if let Some(ph) = hash_value(password) {
            params.push("ph", ph);
        }
        if let Some(ah) = hash_credentials(username, password) {
            params.push("ah", ah);
        }

        params.extend(additional);
        params
    }

    /// Append a field
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Append fields in order
    pub fn extend(&mut self, additional: &[(String, String)]) {
        self.pairs.extend(additional.iter().cloned());
    }

    /// First value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Field names in order
    pub fn keys(&self) -> Vec<&str> {
        self.pairs.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// All pairs in order
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True if there are no fields
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `application/x-www-form-urlencoded` body
    pub fn to_form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// `key=value` pairs joined by `&`, with no percent-encoding.
    ///
    /// Used only for the device GET query string.
    pub fn to_literal_query(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// Values are never printed; hashes and sessions stay out of logs.
impl fmt::Display for RequestParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.keys().join(", "))
    }
}
