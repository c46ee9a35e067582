//! Recurring device usage events.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::device_type::DeviceType;
use crate::types::{ColorTag, DeviceId, EventId, ValidationError};

/// Number of weekday slots; `day_index` runs from 0 (Monday) to 6 (Sunday).
pub const DAYS_PER_WEEK: u8 = 7;

/// Hours on the nominal timeline; `start_hour` must be below this.
pub const HOURS_PER_DAY: f64 = 24.0;

const LAST_MINUTE_OF_DAY: u32 = 24 * 60 - 1;

/// An unvalidated usage record as it arrives from storage or a form.
///
/// Keys follow the storage column names; the camelCase names used by the web
/// client are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: String,
    #[serde(alias = "deviceId")]
    pub device_id: String,
    #[serde(default, alias = "deviceName")]
    pub device_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(alias = "dayIndex")]
    pub day_index: i64,
    #[serde(alias = "startHour")]
    pub start_hour: f64,
    pub duration: f64,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default, rename = "color_class", alias = "colorClass")]
    pub color_tag: String,
}

/// A validated usage event occupying a recurring weekly slot.
///
/// Construct through [`validate`] (or `TryFrom<RawEvent>`); the fields are
/// private so the range invariants hold for every value of this type.
/// Equality and hashing consider only the ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawEvent", into = "RawEvent")]
pub struct UsageEvent {
    id: EventId,
    device_id: DeviceId,
    device_name: String,
    title: String,
    day_index: u8,
    start_hour: f64,
    duration: f64,
    device_type: DeviceType,
    color_tag: ColorTag,
}

/// Validates a raw record, returning the first violated invariant.
pub fn validate(raw: RawEvent) -> Result<UsageEvent, ValidationError> {
    let id = EventId::new(raw.id)?;
    let device_id = DeviceId::new(raw.device_id)?;
    let device_type = raw
        .device_type
        .parse::<DeviceType>()
        .map_err(|e| ValidationError::UnknownDeviceType {
            value: e.value().to_string(),
        })?;

    if !raw.start_hour.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "start hour",
        });
    }
    if !raw.duration.is_finite() {
        return Err(ValidationError::NotFinite { field: "duration" });
    }

    let day_index = u8::try_from(raw.day_index)
        .ok()
        .filter(|d| *d < DAYS_PER_WEEK)
        .ok_or(ValidationError::DayIndexOutOfRange {
            value: raw.day_index,
        })?;
    if !(0.0..HOURS_PER_DAY).contains(&raw.start_hour) {
        return Err(ValidationError::StartHourOutOfRange {
            value: raw.start_hour,
        });
    }
    if raw.duration <= 0.0 {
        return Err(ValidationError::NonPositiveDuration {
            value: raw.duration,
        });
    }

    Ok(UsageEvent {
        id,
        device_id,
        device_name: raw.device_name,
        title: raw.title,
        day_index,
        start_hour: raw.start_hour,
        duration: raw.duration,
        device_type,
        color_tag: ColorTag::from(raw.color_tag),
    })
}

impl UsageEvent {
    pub const fn id(&self) -> &EventId {
        &self.id
    }

    pub const fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Weekday slot, 0 = Monday.
    pub const fn day_index(&self) -> u8 {
        self.day_index
    }

    pub const fn start_hour(&self) -> f64 {
        self.start_hour
    }

    pub const fn duration(&self) -> f64 {
        self.duration
    }

    pub const fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub const fn color_tag(&self) -> &ColorTag {
        &self.color_tag
    }

    /// End of the occupied interval. May exceed 24; nothing wraps past midnight.
    pub fn end_hour(&self) -> f64 {
        self.start_hour + self.duration
    }

    /// Half-open interval overlap on the hour axis, ignoring the weekday.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_hour < other.end_hour() && other.start_hour < self.end_hour()
    }

    /// Start time formatted as `H:MM` (6.5 becomes `6:30`), rounded to the
    /// nearest minute but never past `23:59`.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "start_hour is validated to [0, 24) so minutes fit in u32"
    )]
    pub fn start_label(&self) -> String {
        let minutes = ((self.start_hour * 60.0).round() as u32).min(LAST_MINUTE_OF_DAY);
        format!("{}:{:02}", minutes / 60, minutes % 60)
    }
}

impl TryFrom<RawEvent> for UsageEvent {
    type Error = ValidationError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        validate(raw)
    }
}

impl From<UsageEvent> for RawEvent {
    fn from(event: UsageEvent) -> Self {
        Self {
            id: event.id.into(),
            device_id: event.device_id.into(),
            device_name: event.device_name,
            title: event.title,
            day_index: i64::from(event.day_index),
            start_hour: event.start_hour,
            duration: event.duration,
            device_type: event.device_type.to_string(),
            color_tag: event.color_tag.as_str().to_string(),
        }
    }
}

impl PartialEq for UsageEvent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UsageEvent {}

impl Hash for UsageEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
