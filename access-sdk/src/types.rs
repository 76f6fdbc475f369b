//! Shared types for the Access SDK

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical Access API endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// Velocity counters for a session and credentials
    Velocity,
    /// Device fingerprint for a session
    Device,
    /// Policy decision
    Decision,
    /// Manual device trust state
    DeviceTrust,
    /// Multiplexed device info
    Info,
}

impl Endpoint {
    /// Path segment under `/api/`
    pub fn path_segment(&self) -> &'static str {
        match self {
            Endpoint::Velocity => "velocity",
            Endpoint::Device => "device",
            Endpoint::Decision => "decision",
            Endpoint::DeviceTrust => "devicetrust",
            Endpoint::Info => "info",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Absolute endpoint URLs, fixed at client construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// `https://{host}/api/velocity`
    pub velocity: String,
    /// `https://{host}/api/device`
    pub device: String,
    /// `https://{host}/api/decision`
    pub decision: String,
    /// `https://{host}/api/devicetrust`
    pub device_trust: String,
    /// `https://{host}/api/info`
    pub info: String,
}

impl Endpoints {
    /// Derive all endpoint URLs from a host name
    pub fn for_host(host: &str) -> Self {
        let url = |endpoint: Endpoint| format!("https://{}/api/{}", host, endpoint.path_segment());
        Self {
            velocity: url(Endpoint::Velocity),
            device: url(Endpoint::Device),
            decision: url(Endpoint::Decision),
            device_trust: url(Endpoint::DeviceTrust),
            info: url(Endpoint::Info),
        }
    }

    /// URL for an endpoint
    pub fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Velocity => &self.velocity,
            Endpoint::Device => &self.device,
            Endpoint::Decision => &self.decision,
            Endpoint::DeviceTrust => &self.device_trust,
            Endpoint::Info => &self.info,
        }
    }
}

/// Merchant classification of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustState {
    /// Known good device
    Trusted,
    /// Blocked device
    Banned,
    /// Explicitly untrusted
    NotTrusted,
}

impl TrustState {
    /// Accepted values, lowercase
    pub const VALID_VALUES: [&'static str; 3] = ["trusted", "banned", "not_trusted"];

    /// Canonical wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustState::Trusted => "trusted",
            TrustState::Banned => "banned",
            TrustState::NotTrusted => "not_trusted",
        }
    }
}

impl fmt::Display for TrustState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrustState {
    type Err = Error;

    /// Case-insensitive parse
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trusted" => Ok(TrustState::Trusted),
            "banned" => Ok(TrustState::Banned),
            "not_trusted" => Ok(TrustState::NotTrusted),
            _ => Err(Error::invalid(format!(
                "Invalid device trust state ({}). Must be one of {:?}",
                s,
                Self::VALID_VALUES
            ))),
        }
    }
}

/// Bitmask selecting what `gather_device_info` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReturnValue(u8);

impl ReturnValue {
    /// Device info
    pub const DEVICE_INFO: u8 = 0b0001;
    /// Velocity counters
    pub const VELOCITY: u8 = 0b0010;
    /// Threshold / decision
    pub const THRESHOLD: u8 = 0b0100;
    /// Trusted device state; requires `uniq`
    pub const TRUSTED_STATE: u8 = 0b1000;

    /// Smallest accepted mask
    pub const MIN: i64 = 1;
    /// Largest accepted mask
    pub const MAX: i64 = 15;

    /// Validate a raw mask
    pub fn new(value: i64) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(Error::invalid(format!(
                "Invalid returnValue ({}). Must be an integer between {} and {}",
                value,
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value as u8))
    }

    /// Raw mask
    pub fn bits(&self) -> u8 {
        self.0
    }

    fn has(&self, bit: u8) -> bool {
        self.0 & bit == bit
    }

    /// Bit 1 set
    pub fn wants_device_info(&self) -> bool {
        self.has(Self::DEVICE_INFO)
    }

    /// Bit 2 set
    pub fn wants_velocity(&self) -> bool {
        self.has(Self::VELOCITY)
    }

    /// Bit 4 set
    pub fn wants_threshold(&self) -> bool {
        self.has(Self::THRESHOLD)
    }

    /// Bit 8 set
    pub fn wants_trusted_state(&self) -> bool {
        self.has(Self::TRUSTED_STATE)
    }
}

/// Element of the info endpoint data set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSetElement {
    /// Device info
    Info,
    /// Velocity counters
    Velocity,
    /// Policy decision
    Decision,
    /// Trusted device state; requires `uniq`
    Trusted,
    /// Behavioural biometrics
    BehavioSec,
}

impl DataSetElement {
    /// Flag bit
    pub fn bit(&self) -> u32 {
        match self {
            DataSetElement::Info => 1,
            DataSetElement::Velocity => 2,
            DataSetElement::Decision => 4,
            DataSetElement::Trusted => 8,
            DataSetElement::BehavioSec => 16,
        }
    }
}

/// Builder for the info endpoint's `i` flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InfoDataSet {
    flags: u32,
}

impl InfoDataSet {
    /// Largest valid flag value (all elements)
    pub const MAX_FLAGS: u32 = 31;

    /// Empty data set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a raw flag value, rejecting unknown bits and zero
    pub fn from_flags(flags: u32) -> Result<Self> {
        if flags == 0 || flags > Self::MAX_FLAGS {
            return Err(Error::invalid(format!(
                "Invalid info data set ({}). Must be between 1 and {}",
                flags,
                Self::MAX_FLAGS
            )));
        }
        Ok(Self { flags })
    }

    /// Add an element
    pub fn with(mut self, element: DataSetElement) -> Self {
        self.flags |= element.bit();
        self
    }

    /// Request device info
    pub fn with_info(self) -> Self {
        self.with(DataSetElement::Info)
    }

    /// Request velocity
    pub fn with_velocity(self) -> Self {
        self.with(DataSetElement::Velocity)
    }

    /// Request decision
    pub fn with_decision(self) -> Self {
        self.with(DataSetElement::Decision)
    }

    /// Request trusted state
    pub fn with_trusted_device(self) -> Self {
        self.with(DataSetElement::Trusted)
    }

    /// Request behavioural biometrics
    pub fn with_behavio_sec(self) -> Self {
        self.with(DataSetElement::BehavioSec)
    }

    /// Whether an element is requested
    pub fn contains(&self, element: DataSetElement) -> bool {
        self.flags & element.bit() != 0
    }

    /// Raw flag value
    pub fn build(&self) -> u32 {
        self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_for_host() {
        let endpoints = Endpoints::for_host("999999.kountaccess.com");
        assert_eq!(endpoints.velocity, "https://999999.kountaccess.com/api/velocity");
        assert_eq!(endpoints.device, "https://999999.kountaccess.com/api/device");
        assert_eq!(endpoints.decision, "https://999999.kountaccess.com/api/decision");
        assert_eq!(endpoints.device_trust, "https://999999.kountaccess.com/api/devicetrust");
        assert_eq!(endpoints.url(Endpoint::Info), "https://999999.kountaccess.com/api/info");
    }

    #[test]
    fn test_trust_state_parse() {
        assert_eq!("trusted".parse::<TrustState>().unwrap(), TrustState::Trusted);
        assert_eq!("BANNED".parse::<TrustState>().unwrap(), TrustState::Banned);
        assert_eq!("Not_Trusted".parse::<TrustState>().unwrap(), TrustState::NotTrusted);

        for bad in ["whatever", "", "not trusted", "trusted "] {
            let err = bad.parse::<TrustState>().unwrap_err();
            assert!(err.is_invalid_data(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_return_value_range() {
        assert!(ReturnValue::new(0).is_err());
        assert!(ReturnValue::new(16).is_err());
        assert!(ReturnValue::new(-3).is_err());
        for v in 1..=15 {
            assert_eq!(ReturnValue::new(v).unwrap().bits() as i64, v);
        }
    }

    #[test]
    fn test_return_value_bits() {
        let rv = ReturnValue::new(9).unwrap();
        assert!(rv.wants_device_info());
        assert!(!rv.wants_velocity());
        assert!(!rv.wants_threshold());
        assert!(rv.wants_trusted_state());

        let rv = ReturnValue::new(6).unwrap();
        assert!(rv.wants_velocity() && rv.wants_threshold());
        assert!(!rv.wants_trusted_state());
    }

    #[test]
    fn test_info_data_set_builder() {
        let full = InfoDataSet::new()
            .with_info()
            .with_velocity()
            .with_decision()
            .with_trusted_device()
            .with_behavio_sec();
        assert_eq!(full.build(), 31);
        assert!(full.contains(DataSetElement::Trusted));

        let info_only = InfoDataSet::new().with_info();
        assert_eq!(info_only.build(), 1);
        assert!(!info_only.contains(DataSetElement::Velocity));

        assert!(InfoDataSet::from_flags(0).is_err());
        assert!(InfoDataSet::from_flags(32).is_err());
        assert_eq!(InfoDataSet::from_flags(12).unwrap().build(), 12);
    }
}
