//! Device categories as the single source of truth for type strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of device categories a usage event can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Thermostat,
    Light,
    Camera,
    Plug,
    Lock,
    Speaker,
    Sensor,
    Wifi,
}

impl DeviceType {
    pub const ALL: [Self; 8] = [
        Self::Thermostat,
        Self::Light,
        Self::Camera,
        Self::Plug,
        Self::Lock,
        Self::Speaker,
        Self::Sensor,
        Self::Wifi,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Thermostat => "thermostat",
            Self::Light => "light",
            Self::Camera => "camera",
            Self::Plug => "plug",
            Self::Lock => "lock",
            Self::Speaker => "speaker",
            Self::Sensor => "sensor",
            Self::Wifi => "wifi",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = UnknownDeviceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownDeviceType(s.to_string()))
    }
}

impl Serialize for DeviceType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DeviceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown device type strings.
#[derive(Debug, Clone)]
pub struct UnknownDeviceType(String);

impl UnknownDeviceType {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownDeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown device type: {}", self.0)
    }
}

impl std::error::Error for UnknownDeviceType {}
