//! Rectangle geometry for the timeline.
//!
//! Horizontal placement is in percent of the timeline width. Vertical
//! placement is `hours * row_height`, in whatever unit the renderer measures
//! rows in.

use serde::Serialize;
use thiserror::Error;

use crate::event::{DAYS_PER_WEEK, UsageEvent};
use crate::packer::Packing;
use crate::view::ViewMode;

/// Distance per hour used when the renderer does not say otherwise.
pub const DEFAULT_ROW_HEIGHT: f64 = 80.0;

/// Errors from the geometry stage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("row height must be a positive finite number, got {value}")]
    InvalidRowHeight { value: f64 },

    /// Month and Year views have no event timeline to place rectangles on.
    #[error("{mode} view has no event timeline")]
    NoTimeline { mode: ViewMode },
}

/// Placement of one event rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub left_percent: f64,
    pub width_percent: f64,
    pub top_offset: f64,
    pub height: f64,
}

/// An event with its lane and rectangle, ready to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent {
    #[serde(flatten)]
    pub event: UsageEvent,
    pub lane: usize,
    #[serde(flatten)]
    pub rect: Rect,
}

/// Maps lanes and hours to rectangles for a given row height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    row_height: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

impl Geometry {
    pub fn new(row_height: f64) -> Result<Self, GeometryError> {
        if !row_height.is_finite() || row_height <= 0.0 {
            return Err(GeometryError::InvalidRowHeight { value: row_height });
        }
        Ok(Self { row_height })
    }

    pub const fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Rectangle for one event.
    ///
    /// Week columns are one seventh wide and ignore lanes, so overlapping
    /// events in the same day stack on top of each other. Day view splits the
    /// width evenly between the bucket's lanes.
    #[expect(
        clippy::cast_precision_loss,
        reason = "lane indices and counts are far below 2^52"
    )]
    pub fn rect(
        &self,
        event: &UsageEvent,
        lane: usize,
        lane_count: usize,
        mode: ViewMode,
    ) -> Result<Rect, GeometryError> {
        let (left_percent, width_percent) = match mode {
            ViewMode::Week => (
                f64::from(event.day_index()) * 100.0 / f64::from(DAYS_PER_WEEK),
                100.0 / f64::from(DAYS_PER_WEEK),
            ),
            ViewMode::Day => {
                let lanes = lane_count.max(1) as f64;
                (lane as f64 * 100.0 / lanes, 100.0 / lanes)
            }
            ViewMode::Month | ViewMode::Year => return Err(GeometryError::NoTimeline { mode }),
        };

        Ok(Rect {
            left_percent,
            width_percent,
            top_offset: event.start_hour() * self.row_height,
            height: event.duration() * self.row_height,
        })
    }

    /// Positions a packed bucket. Output follows the order of `bucket`.
    pub fn map(
        &self,
        bucket: &[&UsageEvent],
        packing: &Packing,
        mode: ViewMode,
    ) -> Result<Vec<PositionedEvent>, GeometryError> {
        bucket
            .iter()
            .zip(packing.lanes())
            .map(|(event, &lane)| {
                let rect = self.rect(event, lane, packing.lane_count(), mode)?;
                Ok(PositionedEvent {
                    event: (*event).clone(),
                    lane,
                    rect,
                })
            })
            .collect()
    }
}
