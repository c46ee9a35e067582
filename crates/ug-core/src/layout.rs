//! The layout pass: filter, bucket, pack, position.
//!
//! Every pass is a pure function of the event set, the cursor and the geometry,
//! so independent passes can run on separate threads without coordination.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;

use crate::cursor::{DateCursor, Locale};
use crate::event::UsageEvent;
use crate::filter;
use crate::geometry::{Geometry, GeometryError, PositionedEvent};
use crate::packer::pack;
use crate::view::ViewMode;

/// One rendering column: a weekday in Week view or the selected day in Day view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub day_index: u8,
    pub date: NaiveDate,
    /// Lanes the packer opened; zero means nothing to draw.
    pub lane_count: usize,
    pub events: Vec<PositionedEvent>,
}

/// Result of a layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub view: ViewMode,
    pub reference: NaiveDate,
    pub label: String,
    /// Seven buckets in Week view (fewer only at the calendar limit), one in
    /// Day view, none in Month or Year.
    pub buckets: Vec<Bucket>,
}

impl Layout {
    /// All positioned events, bucket by bucket.
    pub fn positioned(&self) -> impl Iterator<Item = &PositionedEvent> {
        self.buckets.iter().flat_map(|b| b.events.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.events.is_empty())
    }
}

/// Runs one layout pass for the cursor's current view.
pub fn layout(
    events: &[UsageEvent],
    cursor: &DateCursor,
    geometry: &Geometry,
    locale: Locale,
) -> Result<Layout, GeometryError> {
    let mode = cursor.view_mode();
    let visible = filter::select(events, cursor);

    let buckets = match mode {
        ViewMode::Week => cursor
            .week_dates()
            .into_iter()
            .map(|(day_index, date)| build_bucket(&visible, day_index, date, geometry, mode))
            .collect::<Result<Vec<_>, _>>()?,
        ViewMode::Day => {
            let day_index = u8::try_from(cursor.weekday_index())
                .expect("weekday index is always below 7");
            let mut bucket =
                build_bucket(&visible, day_index, cursor.reference(), geometry, mode)?;
            bucket.events.sort_by(|a, b| {
                a.lane
                    .cmp(&b.lane)
                    .then(a.event.start_hour().total_cmp(&b.event.start_hour()))
            });
            vec![bucket]
        }
        ViewMode::Month | ViewMode::Year => Vec::new(),
    };

    let layout = Layout {
        view: mode,
        reference: cursor.reference(),
        label: cursor.label(locale),
        buckets,
    };
    tracing::debug!(
        view = %layout.view,
        label = %layout.label,
        buckets = layout.buckets.len(),
        lanes = ?layout.buckets.iter().map(|b| b.lane_count).collect::<Vec<_>>(),
        "computed layout"
    );
    Ok(layout)
}

/// Runs independent passes for several cursors in parallel, keeping input order.
pub fn layout_periods(
    events: &[UsageEvent],
    cursors: &[DateCursor],
    geometry: &Geometry,
    locale: Locale,
) -> Result<Vec<Layout>, GeometryError> {
    cursors
        .par_iter()
        .map(|cursor| layout(events, cursor, geometry, locale))
        .collect()
}

fn build_bucket(
    visible: &[&UsageEvent],
    day_index: u8,
    date: NaiveDate,
    geometry: &Geometry,
    mode: ViewMode,
) -> Result<Bucket, GeometryError> {
    let members = filter::for_day(visible, day_index);
    let packing = pack(&members);
    let events = geometry.map(&members, &packing, mode)?;
    Ok(Bucket {
        day_index,
        date,
        lane_count: packing.lane_count(),
        events,
    })
}
