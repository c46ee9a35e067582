//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for usage events.
///
/// Every variant names the invariant that was violated so callers can report
/// the rejection back to whoever submitted the record.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A numeric field was NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// The weekday slot was outside 0 (Monday) ..= 6 (Sunday).
    #[error("day index must be between 0 and 6, got {value}")]
    DayIndexOutOfRange { value: i64 },

    /// The start hour was outside [0, 24).
    #[error("start hour must be in [0, 24), got {value}")]
    StartHourOutOfRange { value: f64 },

    /// The duration was zero or negative.
    #[error("duration must be greater than 0 hours, got {value}")]
    NonPositiveDuration { value: f64 },

    /// The device category is not one of the known types.
    #[error("unknown device type: {value}")]
    UnknownDeviceType { value: String },

    /// An event with the same ID is already in the working set.
    #[error("duplicate event ID: {id}")]
    DuplicateId { id: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated usage event identifier.
    ///
    /// Event IDs must be non-empty. They are stable across sessions and are the
    /// sole basis of event equality.
    EventId, "event ID"
);

define_string_id!(
    /// A validated device reference.
    ///
    /// The device itself is owned elsewhere; this is only the foreign key.
    DeviceId, "device ID"
);

/// Opaque styling token handed through to the renderer.
///
/// The core never inspects the contents. Empty tags are allowed and simply mean
/// "renderer default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTag(String);

impl ColorTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ColorTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl From<&str> for ColorTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}
