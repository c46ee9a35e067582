//! Calendar granularity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the usage screen is currently showing.
///
/// Day and Week draw a timeline with positioned events; Month and Year draw
/// aggregate cells only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    Day,
    #[default]
    Week,
    Month,
    Year,
}

impl ViewMode {
    pub const ALL: [Self; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Whether this mode produces event-level timeline geometry.
    #[must_use]
    pub const fn has_timeline(&self) -> bool {
        matches!(self, Self::Day | Self::Week)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "d" => Ok(Self::Day),
            "week" | "w" => Ok(Self::Week),
            "month" | "m" => Ok(Self::Month),
            "year" | "y" => Ok(Self::Year),
            _ => Err(UnknownViewMode(s.to_string())),
        }
    }
}

impl Serialize for ViewMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ViewMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A view mode string outside the closed set. Not recoverable by defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownViewMode(String);

impl fmt::Display for UnknownViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown view mode: {} (expected day, week, month or year)",
            self.0
        )
    }
}

impl std::error::Error for UnknownViewMode {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for mode in ViewMode::ALL {
            let parsed: ViewMode = mode.to_string().parse().expect("should parse");
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn short_and_mixed_case_forms_parse() {
        assert_eq!("D".parse::<ViewMode>().unwrap(), ViewMode::Day);
        assert_eq!(" Month ".parse::<ViewMode>().unwrap(), ViewMode::Month);
    }

    #[test]
    fn unknown_mode_is_an_error_not_a_default() {
        let err = "fortnight".parse::<ViewMode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown view mode: fortnight (expected day, week, month or year)"
        );
        assert!(serde_json::from_str::<ViewMode>("\"quarter\"").is_err());
    }

    #[test]
    fn default_is_week() {
        assert_eq!(ViewMode::default(), ViewMode::Week);
    }

    #[test]
    fn only_day_and_week_have_timelines() {
        assert!(ViewMode::Day.has_timeline());
        assert!(ViewMode::Week.has_timeline());
        assert!(!ViewMode::Month.has_timeline());
        assert!(!ViewMode::Year.has_timeline());
    }
}
