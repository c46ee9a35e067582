//! Add command: validate a new event against the events file and append it.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use ug_core::RawEvent;
use uuid::Uuid;

use crate::Config;
use crate::commands::util::{format_hours, parse_hour, weekday};
use crate::store;

/// Color tag given to events added without `--color`.
pub const DEFAULT_COLOR: &str = "border-blue-500/50 bg-blue-500/20 text-blue-400";

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Device identifier.
    #[arg(long)]
    pub device_id: String,

    /// Display name of the device.
    #[arg(long)]
    pub device_name: String,

    /// Short description of what the device does in this slot.
    #[arg(long, default_value = "")]
    pub title: String,

    /// Weekday slot, 0 (Monday) to 6 (Sunday).
    #[arg(long, allow_negative_numbers = true)]
    pub day: i64,

    /// Start time as H, H:MM or a decimal hour.
    #[arg(long)]
    pub start: String,

    /// Duration in hours.
    #[arg(long, allow_negative_numbers = true)]
    pub duration: f64,

    /// Device type (thermostat, light, camera, plug, lock, speaker, sensor, wifi).
    #[arg(long = "type")]
    pub device_type: String,

    /// Color tag passed through to the renderer.
    #[arg(long)]
    pub color: Option<String>,

    /// Event ID. A random UUID is generated when omitted.
    #[arg(long)]
    pub id: Option<String>,
}

impl AddArgs {
    fn to_raw(&self) -> Result<RawEvent> {
        Ok(RawEvent {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            device_id: self.device_id.clone(),
            device_name: self.device_name.clone(),
            title: self.title.clone(),
            day_index: self.day,
            start_hour: parse_hour(&self.start)?,
            duration: self.duration,
            device_type: self.device_type.clone(),
            color_tag: self
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        })
    }
}

pub fn run<W: Write>(writer: &mut W, args: &AddArgs, config: &Config) -> Result<()> {
    let raw = args.to_raw()?;

    // Held until the record is appended
    let _lock = store::lock(&config.events_path)?;
    let mut loaded = store::load(&config.events_path)?;

    let event = loaded
        .schedule
        .submit(raw)
        .context("event rejected, nothing was written")?;
    let record = RawEvent::from(event.clone());
    store::append(&config.events_path, &record)?;

    writeln!(
        writer,
        "Added {} ({}, {} {} for {})",
        record.id,
        event.device_name(),
        weekday(config.locale, event.day_index()),
        event.start_label(),
        format_hours(event.duration())
    )?;
    Ok(())
}
