//! Shared test data.

use crate::event::{RawEvent, UsageEvent, validate};

/// A light event with the given slot.
pub fn raw(id: &str, day_index: i64, start_hour: f64, duration: f64) -> RawEvent {
    RawEvent {
        id: id.to_string(),
        device_id: format!("dev-{id}"),
        device_name: "Desk lamp".to_string(),
        title: String::new(),
        day_index,
        start_hour,
        duration,
        device_type: "light".to_string(),
        color_tag: "border-red-500/50".to_string(),
    }
}

pub fn event(id: &str, day_index: i64, start_hour: f64, duration: f64) -> UsageEvent {
    validate(raw(id, day_index, start_hour, duration)).unwrap()
}

#[expect(clippy::too_many_arguments, reason = "one row of the sample table")]
fn entry(
    id: &str,
    device_id: &str,
    device_name: &str,
    title: &str,
    day_index: i64,
    start_hour: f64,
    duration: f64,
    device_type: &str,
) -> RawEvent {
    RawEvent {
        id: id.to_string(),
        device_id: device_id.to_string(),
        device_name: device_name.to_string(),
        title: title.to_string(),
        day_index,
        start_hour,
        duration,
        device_type: device_type.to_string(),
        color_tag: format!("border-{device_type}"),
    }
}

/// A week of household devices, including an overlapping Tuesday.
pub fn sample_week_raw() -> Vec<RawEvent> {
    vec![
        entry("1", "t1", "Thermostat", "Keep 24C", 0, 6.0, 1.5, "thermostat"),
        entry("2", "l1", "Living room light", "Morning light", 1, 7.0, 3.0, "light"),
        entry("3", "c1", "Front camera", "Security watch", 1, 6.0, 2.0, "camera"),
        entry("4", "l2", "Door lock", "Auto lock", 1, 10.0, 1.5, "lock"),
        entry("5", "p1", "Plug", "Coffee timer", 0, 11.0, 3.0, "plug"),
        entry("6", "l3", "Study light", "Reading mode", 3, 6.0, 3.0, "light"),
        entry("7", "c2", "Backyard camera", "Motion detection", 3, 8.5, 5.0, "camera"),
        entry("8", "p2", "Air purifier", "Scheduled run", 6, 7.5, 5.0, "plug"),
        entry("9", "s1", "Speaker", "Morning News", 1, 13.0, 2.0, "speaker"),
        entry("10", "t2", "Night light", "Auto on", 4, 22.0, 2.0, "light"),
        entry("11", "x1", "Test device A", "Overlap test", 1, 8.0, 2.0, "sensor"),
    ]
}

pub fn sample_week() -> Vec<UsageEvent> {
    sample_week_raw().into_iter().map(|r| validate(r).unwrap()).collect()
}
