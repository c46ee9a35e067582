//! Selecting the events a view needs.
//!
//! Events are recurring weekday slots, not dated occurrences, so the Week view
//! shows every event whatever week the cursor is on. The Day view keeps the
//! events whose slot matches the cursor's weekday. Month and Year views carry
//! no event-level geometry and select nothing.

use crate::cursor::DateCursor;
use crate::event::UsageEvent;
use crate::view::ViewMode;

/// Returns the events visible under the cursor, in input order.
pub fn select<'a>(events: &'a [UsageEvent], cursor: &DateCursor) -> Vec<&'a UsageEvent> {
    match cursor.view_mode() {
        ViewMode::Week => events.iter().collect(),
        ViewMode::Day => {
            let weekday = cursor.weekday_index();
            events
                .iter()
                .filter(|e| u32::from(e.day_index()) == weekday)
                .collect()
        }
        ViewMode::Month | ViewMode::Year => Vec::new(),
    }
}

/// Events of one weekday column, in input order.
pub fn for_day<'a>(events: &[&'a UsageEvent], day_index: u8) -> Vec<&'a UsageEvent> {
    events
        .iter()
        .copied()
        .filter(|e| e.day_index() == day_index)
        .collect()
}
