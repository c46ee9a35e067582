//! Aggregate cells for the Month and Year views.
//!
//! These views draw no event rectangles. Each calendar date inherits the
//! recurring slots of its weekday, and cells only report how much usage falls
//! on them.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::cursor::{DateCursor, Locale, days_in_month, first_of_month, is_today, last_of_month};
use crate::event::{DAYS_PER_WEEK, UsageEvent};

/// Usage totals for each weekday slot, Monday first.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct WeekdayTotals {
    counts: [usize; DAYS_PER_WEEK as usize],
    hours: [f64; DAYS_PER_WEEK as usize],
}

impl WeekdayTotals {
    fn from_events(events: &[UsageEvent]) -> Self {
        let mut totals = Self::default();
        for event in events {
            let slot = usize::from(event.day_index());
            totals.counts[slot] += 1;
            totals.hours[slot] += event.duration();
        }
        totals
    }

    fn for_date(&self, date: NaiveDate) -> (usize, f64) {
        let slot = date.weekday().num_days_from_monday() as usize;
        (self.counts[slot], self.hours[slot])
    }
}

/// One date in the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub event_count: usize,
    pub usage_hours: f64,
}

/// Monday-first grid of whole weeks covering one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Row-major cells, seven per week.
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn weeks(&self) -> usize {
        self.cells.len() / usize::from(DAYS_PER_WEEK)
    }

    /// Total usage over the dates that belong to the month.
    pub fn usage_hours(&self) -> f64 {
        self.cells
            .iter()
            .filter(|c| c.in_month)
            .map(|c| c.usage_hours)
            .sum()
    }
}

/// Summary of one month in the year grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: u32,
    pub name: String,
    /// Dates in the month with at least one recurring event.
    pub active_days: u32,
    pub usage_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGrid {
    pub year: i32,
    pub months: Vec<MonthSummary>,
}

/// Builds the month grid around the cursor's reference date.
pub fn month_grid(
    cursor: &DateCursor,
    events: &[UsageEvent],
    today: Option<NaiveDate>,
) -> MonthGrid {
    let totals = WeekdayTotals::from_events(events);
    let reference = cursor.reference();
    let first = first_of_month(reference);
    let last = last_of_month(reference);

    let lead = i64::from(first.weekday().num_days_from_monday());
    let trail = i64::from(6 - last.weekday().num_days_from_monday());
    let span = (last - first).num_days() + 1 + lead + trail;

    // Padding days past either end of the calendar are left out
    let cells = (0..span)
        .filter_map(|offset| first.checked_add_signed(Duration::days(offset - lead)))
        .map(|date| {
            let in_month = date.month() == reference.month();
            let (event_count, usage_hours) = if in_month {
                totals.for_date(date)
            } else {
                (0, 0.0)
            };
            DayCell {
                date,
                in_month,
                is_today: is_today(date, today),
                event_count,
                usage_hours,
            }
        })
        .collect();

    MonthGrid {
        year: reference.year(),
        month: reference.month(),
        cells,
    }
}

/// Builds twelve month summaries for the cursor's year.
pub fn year_grid(cursor: &DateCursor, events: &[UsageEvent], locale: Locale) -> YearGrid {
    let totals = WeekdayTotals::from_events(events);
    let year = cursor.reference().year();

    let months = (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .map(|first| {
            let mut active_days = 0;
            let mut usage_hours = 0.0;
            for offset in 0..days_in_month(year, first.month()) {
                let date = first + Duration::days(i64::from(offset));
                let (count, hours) = totals.for_date(date);
                if count > 0 {
                    active_days += 1;
                }
                usage_hours += hours;
            }
            MonthSummary {
                month: first.month(),
                name: month_name(first, locale),
                active_days,
                usage_hours,
            }
        })
        .collect();

    YearGrid { year, months }
}

fn month_name(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::En => date.format("%b").to_string(),
        Locale::Zh => format!("{}月", date.month()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{event, sample_week};
    use crate::view::ViewMode;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn february_2021_fits_in_four_weeks() {
        // Feb 1, 2021 is a Monday and Feb 28 a Sunday
        let cursor = DateCursor::with_view_mode(date(2021, 2, 10), ViewMode::Month);
        let grid = month_grid(&cursor, &[], None);
        assert_eq!(grid.weeks(), 4);
        assert!(grid.cells.iter().all(|c| c.in_month));
    }

    #[test]
    fn grid_pads_to_whole_weeks() {
        // Feb 2022: starts Tuesday, ends Monday
        let cursor = DateCursor::with_view_mode(date(2022, 2, 15), ViewMode::Month);
        let grid = month_grid(&cursor, &[], Some(date(2022, 2, 15)));

        assert_eq!(grid.cells.len(), 35);
        assert_eq!(grid.weeks(), 5);
        assert_eq!(grid.cells[0].date, date(2022, 1, 31));
        assert!(!grid.cells[0].in_month);
        assert_eq!(grid.cells[34].date, date(2022, 3, 6));
        assert!(!grid.cells[34].in_month);
        let today: Vec<_> = grid.cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2022, 2, 15));
    }

    #[test]
    fn saturday_start_needs_six_weeks() {
        // Jan 1, 2022 is a Saturday and the month has 31 days
        let cursor = DateCursor::with_view_mode(date(2022, 1, 20), ViewMode::Month);
        let grid = month_grid(&cursor, &[], None);

        assert_eq!(grid.cells.len(), 42);
        assert_eq!(grid.weeks(), 6);
        assert_eq!(grid.cells[0].date, date(2021, 12, 27));
        assert_eq!(grid.cells[5].date, date(2022, 1, 1));
        assert!(grid.cells[5].in_month);
        assert_eq!(grid.cells[41].date, date(2022, 2, 6));
        assert_eq!(grid.cells.iter().filter(|c| c.in_month).count(), 31);
    }

    #[test]
    fn month_at_the_calendar_limit() {
        let cursor = DateCursor::with_view_mode(NaiveDate::MAX, ViewMode::Month);
        let grid = month_grid(&cursor, &sample_week(), None);
        assert_eq!(grid.cells.last().unwrap().date, NaiveDate::MAX);
        assert_eq!(grid.cells.iter().filter(|c| c.in_month).count(), 31);
    }

    #[test]
    fn cells_inherit_their_weekday_slots() {
        let events = vec![
            event("tue-a", 1, 7.0, 3.0),
            event("tue-b", 1, 13.0, 2.0),
            event("sun", 6, 7.5, 5.0),
        ];
        let cursor = DateCursor::with_view_mode(date(2022, 2, 1), ViewMode::Month);
        let grid = month_grid(&cursor, &events, None);

        let cell = |d: NaiveDate| grid.cells.iter().find(|c| c.date == d).unwrap();
        assert_eq!(cell(date(2022, 2, 15)).event_count, 2);
        assert!((cell(date(2022, 2, 15)).usage_hours - 5.0).abs() < f64::EPSILON);
        assert_eq!(cell(date(2022, 2, 20)).event_count, 1);
        assert_eq!(cell(date(2022, 2, 16)).event_count, 0);
        // Monday Jan 31 is padding, not part of February
        assert_eq!(cell(date(2022, 1, 31)).event_count, 0);
        // Four Tuesdays and four Sundays in February 2022
        assert!((grid.usage_hours() - (4.0 * 5.0 + 4.0 * 5.0)).abs() < 1e-9);
    }

    #[test]
    fn year_grid_counts_active_days() {
        let events = vec![event("mon", 0, 6.0, 1.5)];
        let cursor = DateCursor::with_view_mode(date(2022, 6, 1), ViewMode::Year);
        let grid = year_grid(&cursor, &events, Locale::En);

        assert_eq!(grid.year, 2022);
        assert_eq!(grid.months.len(), 12);
        // Mondays in Jan 2022: 3, 10, 17, 24, 31
        assert_eq!(grid.months[0].active_days, 5);
        assert_eq!(grid.months[0].name, "Jan");
        assert!((grid.months[0].usage_hours - 7.5).abs() < 1e-9);
        // Mondays in Feb 2022: 7, 14, 21, 28
        assert_eq!(grid.months[1].active_days, 4);
        let total: u32 = grid.months.iter().map(|m| m.active_days).sum();
        assert_eq!(total, 52);
    }

    #[test]
    fn year_grid_names_months_per_locale() {
        let cursor = DateCursor::with_view_mode(date(2022, 6, 1), ViewMode::Year);
        let grid = year_grid(&cursor, &sample_week(), Locale::Zh);
        assert_eq!(grid.months[11].name, "12月");
        assert!(grid.months.iter().all(|m| m.active_days > 0));
    }

    #[test]
    fn no_events_means_empty_cells() {
        let cursor = DateCursor::with_view_mode(date(2022, 2, 1), ViewMode::Year);
        let grid = year_grid(&cursor, &[], Locale::En);
        assert!(grid.months.iter().all(|m| m.active_days == 0 && m.usage_hours == 0.0));
    }
}
