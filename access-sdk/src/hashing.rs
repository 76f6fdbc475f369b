//! Credential hashing and the authorization header

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use sha2::{Digest, Sha256};

/// Text substituted for a missing username or password in the combined hash
pub const MISSING_CREDENTIAL: &str = "null";

/// Lowercase hex SHA-256 of the UTF-8 bytes of `value`.
///
/// Absent or empty values yield `None`; the field is then omitted rather
/// than sent as the digest of an empty string.
pub fn hash_value(value: Option<&str>) -> Option<String> {
    let value = value.filter(|v| !v.is_empty())?;
    Some(hex::encode(Sha256::digest(value.as_bytes())))
}

/// Hash of `username:password`, or `None` when both are absent.
///
/// A missing side is rendered as [`MISSING_CREDENTIAL`].
pub fn hash_credentials(username: Option<&str>, password: Option<&str>) -> Option<String> {
    if username.is_none() && password.is_none() {
        return None;
    }
    let joined = format!(
        "{}:{}",
        username.unwrap_or(MISSING_CREDENTIAL),
        password.unwrap_or(MISSING_CREDENTIAL)
    );
    hash_value(Some(&joined))
}

/// `Basic base64("{merchant_id}:{api_key}")`
pub fn authorization_header(merchant_id: i64, api_key: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{}:{}", merchant_id, api_key)))
}
