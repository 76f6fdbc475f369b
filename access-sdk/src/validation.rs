//! Field validation for Access requests
//!
//! Every check here runs before any network call. Lengths are counted in
//! characters, not bytes.

use crate::types::{InfoDataSet, DataSetElement, ReturnValue, TrustState};
use crate::{Error, Result};
use tracing::debug;

/// Exact length of a session id
pub const SESSION_LENGTH: usize = 32;

/// Exact length of a device id (fingerprint)
pub const DEVICE_ID_LENGTH: usize = 32;

/// Maximum length of a merchant `uniq` identifier
pub const UNIQ_MAX_LENGTH: usize = 32;

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Session must be exactly 32 characters
pub fn verify_session(session: &str) -> Result<()> {
    if char_len(session) != SESSION_LENGTH {
        return Err(Error::invalid(format!(
            "Invalid sessionid ({}). Must be {} characters in length",
            session, SESSION_LENGTH
        )));
    }
    Ok(())
}

/// Device id must be exactly 32 characters
pub fn verify_device_id(device_id: &str) -> Result<()> {
    if char_len(device_id) != DEVICE_ID_LENGTH {
        return Err(Error::invalid(format!(
            "Invalid deviceId ({}). Must be {} characters in length",
            device_id, DEVICE_ID_LENGTH
        )));
    }
    Ok(())
}

/// Uniq must not exceed 32 characters
pub fn verify_uniq(uniq: &str) -> Result<()> {
    if char_len(uniq) > UNIQ_MAX_LENGTH {
        return Err(Error::invalid(format!(
            "Invalid uniq value ({}). Must not exceed {} characters in length",
            uniq, UNIQ_MAX_LENGTH
        )));
    }
    Ok(())
}

/// Trust state must be trusted, banned or not_trusted (any case)
pub fn verify_trust_state(trust_state: &str) -> Result<TrustState> {
    trust_state.parse()
}

/// Value must be non-blank after trimming
pub fn verify_not_blank(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid(format!("Missing {}", field)));
    }
    if value.trim().is_empty() {
        return Err(Error::invalid(format!("Invalid {} ({}). Must not be blank", field, value)));
    }
    Ok(())
}

/// Value must parse as a JSON document
pub fn verify_json(field: &str, value: &str) -> Result<()> {
    serde_json::from_str::<serde_json::Value>(value)
        .map(|_| ())
        .map_err(|e| Error::invalid(format!("Invalid {} ({}). Must be valid JSON: {}", field, value, e)))
}

/// Checks for `gather_device_info`.
///
/// Order: session, return value range, device id, then uniq when the
/// trusted-state bit is requested.
pub fn verify_gather_info(
    session: &str,
    return_value: i64,
    device_id: &str,
    uniq: Option<&str>,
) -> Result<ReturnValue> {
    verify_session(session)?;
    let return_value = ReturnValue::new(return_value)?;
    verify_device_id(device_id)?;

    if return_value.wants_device_info() {
        debug!("gatherDeviceInfo requested deviceInfo");
    }
    if return_value.wants_velocity() {
        debug!("gatherDeviceInfo requested velocity");
    }
    if return_value.wants_threshold() {
        debug!("gatherDeviceInfo requested threshold");
    }
    if return_value.wants_trusted_state() {
        debug!("gatherDeviceInfo requested trustedState");
        match uniq {
            Some(uniq) => verify_uniq(uniq)?,
            None => return Err(Error::invalid("Missing uniq. Required when requesting trusted state")),
        }
    }

    Ok(return_value)
}

/// Checks for `get_info`: session, data set, then uniq (required for trusted state).
pub fn verify_info(session: &str, data_set: InfoDataSet, uniq: Option<&str>) -> Result<()> {
    verify_session(session)?;
    InfoDataSet::from_flags(data_set.build())?;

    match uniq {
        Some(uniq) => verify_uniq(uniq),
        None if data_set.contains(DataSetElement::Trusted) => {
            Err(Error::invalid("Missing uniq. Required when requesting trusted state"))
        }
        None => Ok(()),
    }
}
