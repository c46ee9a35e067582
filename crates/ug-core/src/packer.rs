//! Lane assignment for overlapping events.
//!
//! # Algorithm
//!
//! Greedy first-fit interval colouring over one bucket:
//!
//! 1. Order events by `start_hour`, keeping input order for ties (stable sort)
//! 2. Each lane remembers only the end hour of the last event placed in it
//! 3. An event goes into the first lane whose end is `<=` its start, otherwise
//!    it opens a new lane
//!
//! Lanes are rebuilt from scratch on every call. An event's lane only moves
//! when something earlier in the sort order changes, which keeps the picture
//! stable as events are added.

use std::collections::HashMap;

use crate::event::UsageEvent;

/// Lane assignment for one bucket, indexed like the input slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packing {
    lanes: Vec<usize>,
    lane_count: usize,
}

impl Packing {
    /// Lane of the event at `index` in the packed slice.
    pub fn lane_of(&self, index: usize) -> Option<usize> {
        self.lanes.get(index).copied()
    }

    /// Lanes in input order.
    pub fn lanes(&self) -> &[usize] {
        &self.lanes
    }

    /// Number of lanes opened; zero for an empty bucket.
    pub const fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Lane per event, keyed by the event itself (equality is by ID).
    pub fn to_map<'a>(&self, events: &[&'a UsageEvent]) -> HashMap<&'a UsageEvent, usize> {
        events.iter().copied().zip(self.lanes.iter().copied()).collect()
    }
}

/// Assigns every event of a single bucket to a lane.
pub fn pack(events: &[&UsageEvent]) -> Packing {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by(|&a, &b| events[a].start_hour().total_cmp(&events[b].start_hour()));

    let mut lane_ends: Vec<f64> = Vec::new();
    let mut lanes = vec![0; events.len()];

    for index in order {
        let event = events[index];
        let lane = if let Some(free) = lane_ends
            .iter()
            .position(|&end| end <= event.start_hour())
        {
            lane_ends[free] = event.end_hour();
            free
        } else {
            lane_ends.push(event.end_hour());
            lane_ends.len() - 1
        };
        tracing::trace!(event = %event.id(), lane, "placed event");
        lanes[index] = lane;
    }

    Packing {
        lanes,
        lane_count: lane_ends.len(),
    }
}
