//! Core domain logic for the usage grid.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: validated recurring weekday usage slots
//! - Navigation: a date cursor stepping by day, week, month or year
//! - Layout: filtering, lane packing and rectangle geometry for the timeline
//! - Aggregates: per-date usage cells for the month and year grids

mod aggregate;
mod cursor;
pub mod device_type;
mod event;
pub mod filter;
mod geometry;
mod layout;
mod packer;
mod schedule;
pub mod types;
mod view;

#[cfg(test)]
mod fixtures;

pub use aggregate::{DayCell, MonthGrid, MonthSummary, YearGrid, month_grid, year_grid};
pub use cursor::{DateCursor, DayHeader, Locale, is_today};
pub use device_type::{DeviceType, UnknownDeviceType};
pub use event::{DAYS_PER_WEEK, HOURS_PER_DAY, RawEvent, UsageEvent, validate};
pub use geometry::{DEFAULT_ROW_HEIGHT, Geometry, GeometryError, PositionedEvent, Rect};
pub use layout::{Bucket, Layout, layout, layout_periods};
pub use packer::{Packing, pack};
pub use schedule::{IngestReport, Rejection, Schedule};
pub use types::{ColorTag, DeviceId, EventId, ValidationError};
pub use view::{UnknownViewMode, ViewMode};
