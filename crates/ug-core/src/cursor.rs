//! The date cursor: what range is on screen and how to move it.
//!
//! The cursor never reads the wall clock. Anything that needs "today" (only
//! header highlighting does) takes it as an argument.
//!
//! # Month stepping
//!
//! Month and Year steps keep an *anchor* day-of-month, set at construction and
//! by every Day or Week step. Each Month/Year step lands on the anchor clamped
//! to the length of the target month, so Mar 31 steps to Apr 30 and then to
//! May 31, and stepping forward then back always returns to the start.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::event::DAYS_PER_WEEK;
use crate::view::ViewMode;

const WEEKDAYS_EN: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const WEEKDAYS_ZH: [&str; 7] = [
    "星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日",
];

/// Language used for range labels and day headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Full weekday name for a Monday-based index. Indices wrap modulo 7.
    pub fn weekday_name(self, day_index: usize) -> &'static str {
        let names = match self {
            Self::En => &WEEKDAYS_EN,
            Self::Zh => &WEEKDAYS_ZH,
        };
        names[day_index % names.len()]
    }
}

/// One column header of the week timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHeader {
    pub day_index: u8,
    pub name: &'static str,
    pub date: NaiveDate,
    pub is_today: bool,
}

/// Reference date plus active view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateCursor {
    reference: NaiveDate,
    mode: ViewMode,
    anchor_day: u32,
}

impl DateCursor {
    /// Creates a cursor at `date` in Week mode.
    pub fn new(date: NaiveDate) -> Self {
        Self::with_view_mode(date, ViewMode::Week)
    }

    pub fn with_view_mode(date: NaiveDate, mode: ViewMode) -> Self {
        Self {
            reference: date,
            mode,
            anchor_day: date.day(),
        }
    }

    pub const fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub const fn view_mode(&self) -> ViewMode {
        self.mode
    }

    /// Switches the view mode; the reference date is left alone.
    pub const fn set_view_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Moves forward one unit of the current view mode.
    pub fn advance(&mut self) {
        self.step(1);
    }

    /// Moves backward one unit of the current view mode.
    pub fn retreat(&mut self) {
        self.step(-1);
    }

    /// Advances `steps` times, or retreats when `steps` is negative.
    ///
    /// Stops early at the calendar limit.
    pub fn step_by(&mut self, steps: i32) {
        let unit = steps.signum();
        for _ in 0..steps.unsigned_abs() {
            if !self.step(unit) {
                break;
            }
        }
    }

    /// This cursor followed by the next `count - 1` periods of the same mode.
    pub fn successors(&self, count: usize) -> Vec<Self> {
        let mut current = *self;
        let mut periods = Vec::with_capacity(count);
        for _ in 0..count {
            periods.push(current);
            current.advance();
        }
        periods
    }

    /// Returns `false` when the step would leave the representable calendar.
    fn step(&mut self, delta: i32) -> bool {
        let next = match self.mode {
            ViewMode::Day => self.reference.checked_add_signed(Duration::days(i64::from(delta))),
            ViewMode::Week => self
                .reference
                .checked_add_signed(Duration::days(7 * i64::from(delta))),
            ViewMode::Month => shift_months(self.reference, self.anchor_day, delta),
            ViewMode::Year => shift_months(self.reference, self.anchor_day, 12 * delta),
        };

        let Some(next) = next else {
            tracing::warn!(date = %self.reference, mode = %self.mode, "cursor is at the calendar limit");
            return false;
        };

        self.reference = next;
        if matches!(self.mode, ViewMode::Day | ViewMode::Week) {
            self.anchor_day = next.day();
        }
        true
    }

    /// Monday on or before the reference date, clamped to the earliest
    /// representable date.
    pub fn week_start(&self) -> NaiveDate {
        let days_since_monday = self.reference.weekday().num_days_from_monday();
        self.reference
            .checked_sub_signed(Duration::days(i64::from(days_since_monday)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Dated weekday slots of the reference week, Monday first.
    ///
    /// Slots past either end of the calendar are left out, so a week at the
    /// limit has fewer than seven entries.
    pub fn week_dates(&self) -> Vec<(u8, NaiveDate)> {
        let offset = i64::from(self.weekday_index());
        (0..DAYS_PER_WEEK)
            .filter_map(|day_index| {
                self.reference
                    .checked_add_signed(Duration::days(i64::from(day_index) - offset))
                    .map(|date| (day_index, date))
            })
            .collect()
    }

    /// Weekday of the reference date, 0 = Monday.
    pub fn weekday_index(&self) -> u32 {
        self.reference.weekday().num_days_from_monday()
    }

    /// First and last date (inclusive) covered by the current view.
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        match self.mode {
            ViewMode::Day => (self.reference, self.reference),
            ViewMode::Week => {
                let dates = self.week_dates();
                let start = dates.first().map_or(self.reference, |&(_, d)| d);
                let end = dates.last().map_or(self.reference, |&(_, d)| d);
                (start, end)
            }
            ViewMode::Month => (
                first_of_month(self.reference),
                last_of_month(self.reference),
            ),
            ViewMode::Year => {
                let year = self.reference.year();
                let january = NaiveDate::from_ymd_opt(year, 1, 1)
                    .expect("January 1st exists in every representable year");
                let december = NaiveDate::from_ymd_opt(year, 12, 31)
                    .expect("December 31st exists in every representable year");
                (january, december)
            }
        }
    }

    /// Header text for the displayed range.
    pub fn label(&self, locale: Locale) -> String {
        let date = self.reference;
        match (self.mode, locale) {
            (ViewMode::Day, _) => format!(
                "{}, {}",
                locale.weekday_name(self.weekday_index() as usize),
                date.format("%m-%d")
            ),
            (ViewMode::Week, Locale::En) => {
                let (start, end) = self.range();
                format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
            }
            (ViewMode::Week, Locale::Zh) => {
                let (start, end) = self.range();
                format!(
                    "{}月 {}日 - {}月 {}日",
                    start.month(),
                    start.day(),
                    end.month(),
                    end.day()
                )
            }
            (ViewMode::Month, Locale::En) => format!("{} {}", date.format("%B"), date.year()),
            (ViewMode::Month, Locale::Zh) => format!("{}年 {}月", date.year(), date.month()),
            (ViewMode::Year, Locale::En) => date.year().to_string(),
            (ViewMode::Year, Locale::Zh) => format!("{}年", date.year()),
        }
    }

    /// Whether the reference date is `today`. A missing `today` is never today.
    pub fn is_today(&self, today: Option<NaiveDate>) -> bool {
        is_today(self.reference, today)
    }

    /// Column headers for the week containing the reference date.
    pub fn week_days(&self, locale: Locale, today: Option<NaiveDate>) -> Vec<DayHeader> {
        self.week_dates()
            .into_iter()
            .map(|(day_index, date)| DayHeader {
                day_index,
                name: locale.weekday_name(usize::from(day_index)),
                date,
                is_today: is_today(date, today),
            })
            .collect()
    }
}

/// Date equality against an injected "today".
pub fn is_today(date: NaiveDate, today: Option<NaiveDate>) -> bool {
    today == Some(date)
}

pub(crate) const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

pub(crate) fn last_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date.year(), date.month()))
        .expect("days_in_month returns a valid day")
}

/// Shifts by whole months, landing on `anchor_day` clamped to the target month.
fn shift_months(date: NaiveDate, anchor_day: u32, months: i32) -> Option<NaiveDate> {
    let month0 = i32::try_from(date.month0()).ok()?;
    let total = date.year().checked_mul(12)?.checked_add(month0)?.checked_add(months)?;
    let year = total.div_euclid(12);
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    let day = anchor_day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_cursor_starts_in_week_mode() {
        let cursor = DateCursor::new(date(2022, 2, 15));
        assert_eq!(cursor.view_mode(), ViewMode::Week);
        assert_eq!(cursor.reference(), date(2022, 2, 15));
    }

    #[test]
    fn set_view_mode_keeps_the_date() {
        let mut cursor = DateCursor::new(date(2022, 2, 15));
        cursor.set_view_mode(ViewMode::Year);
        assert_eq!(cursor.view_mode(), ViewMode::Year);
        assert_eq!(cursor.reference(), date(2022, 2, 15));
    }

    #[test]
    fn week_start_of_wednesday_is_two_days_earlier() {
        // Jan 29, 2025 is a Wednesday
        let cursor = DateCursor::new(date(2025, 1, 29));
        assert_eq!(cursor.week_start(), date(2025, 1, 27));
        assert_eq!(cursor.label(Locale::En), "Jan 27 - Feb 2");
    }

    #[test]
    fn week_start_of_monday_is_itself() {
        let cursor = DateCursor::new(date(2025, 1, 27));
        assert_eq!(cursor.week_start(), date(2025, 1, 27));
    }

    #[test]
    fn week_start_of_sunday_is_previous_monday() {
        let cursor = DateCursor::new(date(2025, 2, 2));
        assert_eq!(cursor.week_start(), date(2025, 1, 27));
    }

    #[test]
    fn day_and_week_steps() {
        let mut cursor = DateCursor::with_view_mode(date(2022, 2, 28), ViewMode::Day);
        cursor.advance();
        assert_eq!(cursor.reference(), date(2022, 3, 1));

        cursor.set_view_mode(ViewMode::Week);
        cursor.retreat();
        assert_eq!(cursor.reference(), date(2022, 2, 22));
    }

    #[test]
    fn retreating_from_march_31_lands_on_end_of_february() {
        let mut cursor = DateCursor::with_view_mode(date(2022, 3, 31), ViewMode::Month);
        cursor.retreat();
        assert_eq!(cursor.reference(), date(2022, 2, 28));

        let mut leap = DateCursor::with_view_mode(date(2024, 3, 31), ViewMode::Month);
        leap.retreat();
        assert_eq!(leap.reference(), date(2024, 2, 29));
    }

    #[test]
    fn month_steps_from_march_31_restore_day_31() {
        let mut cursor = DateCursor::with_view_mode(date(2022, 3, 31), ViewMode::Month);
        let mut visited = Vec::new();
        for _ in 0..4 {
            cursor.advance();
            visited.push(cursor.reference());
        }
        assert_eq!(
            visited,
            vec![
                date(2022, 4, 30),
                date(2022, 5, 31),
                date(2022, 6, 30),
                date(2022, 7, 31),
            ]
        );
    }

    #[test]
    fn month_steps_cross_year_boundaries() {
        let mut cursor = DateCursor::with_view_mode(date(2022, 12, 15), ViewMode::Month);
        cursor.advance();
        assert_eq!(cursor.reference(), date(2023, 1, 15));
        cursor.step_by(-2);
        assert_eq!(cursor.reference(), date(2022, 11, 15));
    }

    #[test]
    fn year_step_from_leap_day_clamps_and_returns() {
        let mut cursor = DateCursor::with_view_mode(date(2024, 2, 29), ViewMode::Year);
        cursor.advance();
        assert_eq!(cursor.reference(), date(2025, 2, 28));
        cursor.retreat();
        assert_eq!(cursor.reference(), date(2024, 2, 29));
    }

    #[test]
    fn day_step_resets_the_anchor() {
        let mut cursor = DateCursor::with_view_mode(date(2022, 1, 31), ViewMode::Month);
        cursor.advance(); // Feb 28, anchor still 31
        cursor.set_view_mode(ViewMode::Day);
        cursor.retreat(); // Feb 27, anchor now 27
        cursor.set_view_mode(ViewMode::Month);
        cursor.advance();
        assert_eq!(cursor.reference(), date(2022, 3, 27));
    }

    #[test]
    fn advance_then_retreat_is_identity_for_every_mode() {
        let starts = [
            date(2022, 1, 31),
            date(2022, 2, 15),
            date(2024, 2, 29),
            date(2022, 3, 31),
            date(2022, 12, 31),
            date(2023, 8, 30),
        ];
        for start in starts {
            for mode in ViewMode::ALL {
                let mut cursor = DateCursor::with_view_mode(start, mode);
                cursor.advance();
                cursor.retreat();
                assert_eq!(cursor.reference(), start, "{mode} from {start}");

                cursor.retreat();
                cursor.advance();
                assert_eq!(cursor.reference(), start, "{mode} back from {start}");
            }
        }
    }

    #[test]
    fn successors_follow_the_view_mode() {
        let cursor = DateCursor::with_view_mode(date(2022, 1, 31), ViewMode::Month);
        let dates: Vec<_> = cursor.successors(3).iter().map(DateCursor::reference).collect();
        assert_eq!(dates, vec![date(2022, 1, 31), date(2022, 2, 28), date(2022, 3, 31)]);
        assert!(cursor.successors(0).is_empty());
    }

    #[test]
    fn labels_in_english() {
        // Feb 15, 2022 is a Tuesday
        let mut cursor = DateCursor::new(date(2022, 2, 15));
        assert_eq!(cursor.label(Locale::En), "Feb 14 - Feb 20");
        cursor.set_view_mode(ViewMode::Day);
        assert_eq!(cursor.label(Locale::En), "Tuesday, 02-15");
        cursor.set_view_mode(ViewMode::Month);
        assert_eq!(cursor.label(Locale::En), "February 2022");
        cursor.set_view_mode(ViewMode::Year);
        assert_eq!(cursor.label(Locale::En), "2022");
    }

    #[test]
    fn labels_in_chinese() {
        let mut cursor = DateCursor::new(date(2022, 2, 15));
        assert_eq!(cursor.label(Locale::Zh), "2月 14日 - 2月 20日");
        cursor.set_view_mode(ViewMode::Day);
        assert_eq!(cursor.label(Locale::Zh), "星期二, 02-15");
        cursor.set_view_mode(ViewMode::Month);
        assert_eq!(cursor.label(Locale::Zh), "2022年 2月");
        cursor.set_view_mode(ViewMode::Year);
        assert_eq!(cursor.label(Locale::Zh), "2022年");
    }

    #[test]
    fn week_label_crosses_month_and_year() {
        let cursor = DateCursor::new(date(2022, 1, 1));
        assert_eq!(cursor.label(Locale::En), "Dec 27 - Jan 2");
        assert_eq!(cursor.label(Locale::Zh), "12月 27日 - 1月 2日");
    }

    #[test]
    fn range_per_mode() {
        let mut cursor = DateCursor::new(date(2024, 2, 15));
        assert_eq!(cursor.range(), (date(2024, 2, 12), date(2024, 2, 18)));
        cursor.set_view_mode(ViewMode::Day);
        assert_eq!(cursor.range(), (date(2024, 2, 15), date(2024, 2, 15)));
        cursor.set_view_mode(ViewMode::Month);
        assert_eq!(cursor.range(), (date(2024, 2, 1), date(2024, 2, 29)));
        cursor.set_view_mode(ViewMode::Year);
        assert_eq!(cursor.range(), (date(2024, 1, 1), date(2024, 12, 31)));
    }

    #[test]
    fn week_days_highlight_injected_today() {
        let cursor = DateCursor::new(date(2022, 2, 15));
        let headers = cursor.week_days(Locale::En, Some(date(2022, 2, 17)));

        assert_eq!(headers.len(), 7);
        assert_eq!(headers[0].date, date(2022, 2, 14));
        assert_eq!(headers[0].name, "Monday");
        assert_eq!(headers[6].date, date(2022, 2, 20));
        let today: Vec<_> = headers.iter().filter(|h| h.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].day_index, 3);
    }

    #[test]
    fn no_today_means_nothing_highlighted() {
        let cursor = DateCursor::new(date(2022, 2, 15));
        assert!(cursor.week_days(Locale::Zh, None).iter().all(|h| !h.is_today));
        assert!(!cursor.is_today(None));
        assert!(cursor.is_today(Some(date(2022, 2, 15))));
    }

    #[test]
    fn calendar_limits_do_not_panic() {
        let cursor = DateCursor::new(NaiveDate::MAX);
        let headers = cursor.week_days(Locale::En, None);
        assert_eq!(headers.len(), cursor.weekday_index() as usize + 1);
        assert_eq!(cursor.range(), (cursor.week_start(), NaiveDate::MAX));
        assert!(!cursor.label(Locale::En).is_empty());

        let cursor = DateCursor::new(NaiveDate::MIN);
        let (start, end) = cursor.range();
        assert!(start <= NaiveDate::MIN && NaiveDate::MIN <= end);
        assert!(!cursor.label(Locale::Zh).is_empty());
    }

    #[test]
    fn step_by_stops_at_the_calendar_limit() {
        let mut cursor = DateCursor::with_view_mode(date(2022, 2, 15), ViewMode::Year);
        cursor.step_by(i32::MAX);
        assert_eq!(cursor.reference().month(), 2);
        assert!(cursor.reference().year() > 200_000);

        let mut cursor = DateCursor::with_view_mode(NaiveDate::MAX, ViewMode::Day);
        cursor.step_by(i32::MAX);
        assert_eq!(cursor.reference(), NaiveDate::MAX);
        cursor.step_by(-1);
        assert_eq!(cursor.reference(), NaiveDate::MAX.pred_opt().unwrap());
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }
}
