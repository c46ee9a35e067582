//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use regex::Regex;
use ug_core::{DateCursor, Locale, ViewMode};

/// Pre-compiled regex for `H`, `H:MM` or decimal hour input.
static HOUR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})(?::([0-5]\d)|(\.\d+))?$").expect("hour pattern is valid")
});

/// Period selection shared by the layout and label commands.
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Reference date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// View mode: day, week, month or year. Defaults to the configured view.
    #[arg(long)]
    pub view: Option<ViewMode>,

    /// Periods to advance from the reference date; negative values go back.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub steps: i32,
}

impl ViewArgs {
    /// Builds the cursor these arguments select.
    pub fn cursor(&self, default_view: ViewMode, today: NaiveDate) -> DateCursor {
        let mode = self.view.unwrap_or(default_view);
        let mut cursor = DateCursor::with_view_mode(self.date.unwrap_or(today), mode);
        cursor.step_by(self.steps);
        cursor
    }
}

/// Parses a start time as `H`, `H:MM` or a decimal hour such as `8.5`.
///
/// Only the format is checked here; the hour range is validated with the
/// rest of the event.
pub fn parse_hour(s: &str) -> anyhow::Result<f64> {
    let trimmed = s.trim();
    let Some(caps) = HOUR_RE.captures(trimmed) else {
        anyhow::bail!("Invalid start time: {s}. Use H, H:MM or a decimal hour (e.g., 8:30 or 8.5)");
    };

    if caps.get(3).is_some() {
        return trimmed
            .parse()
            .with_context(|| format!("failed to parse start time {s}"));
    }

    let hours: f64 = caps[1]
        .parse()
        .context("failed to parse hours in start time")?;
    let minutes: f64 = match caps.get(2) {
        Some(m) => m
            .as_str()
            .parse()
            .context("failed to parse minutes in start time")?,
        None => 0.0,
    };
    Ok(hours + minutes / 60.0)
}

/// Two-digit month and day, as in the day-view label.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

/// Hour count with a single decimal, e.g. `1.5h`.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.1}h")
}

/// Column name for a weekday slot in the given locale.
pub fn weekday(locale: Locale, day_index: u8) -> &'static str {
    locale.weekday_name(usize::from(day_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "values are exact binary fractions")]
    fn parses_hour_forms() {
        assert_eq!(parse_hour("6").unwrap(), 6.0);
        assert_eq!(parse_hour("8:30").unwrap(), 8.5);
        assert_eq!(parse_hour("22:15").unwrap(), 22.25);
        assert_eq!(parse_hour("7.5").unwrap(), 7.5);
        assert_eq!(parse_hour(" 13 ").unwrap(), 13.0);
    }

    #[test]
    fn out_of_range_hours_pass_through_for_validation() {
        assert!((parse_hour("25:00").unwrap() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_malformed_hours() {
        assert!(parse_hour("8:75").is_err());
        assert!(parse_hour("eight").is_err());
        assert!(parse_hour("-1").is_err());
        assert!(parse_hour("").is_err());
        let err = parse_hour("8h").unwrap_err();
        assert!(err.to_string().contains("Invalid start time: 8h"));
    }

    #[test]
    fn cursor_applies_view_and_steps() {
        let args = ViewArgs {
            date: Some(date(2022, 3, 31)),
            view: Some(ViewMode::Month),
            steps: -1,
        };
        let cursor = args.cursor(ViewMode::Week, date(2000, 1, 1));
        assert_eq!(cursor.reference(), date(2022, 2, 28));
        assert_eq!(cursor.view_mode(), ViewMode::Month);
    }

    #[test]
    fn cursor_defaults_to_today_and_configured_view() {
        let args = ViewArgs {
            date: None,
            view: None,
            steps: 0,
        };
        let cursor = args.cursor(ViewMode::Day, date(2022, 2, 15));
        assert_eq!(cursor.reference(), date(2022, 2, 15));
        assert_eq!(cursor.view_mode(), ViewMode::Day);
    }

    #[test]
    fn formats_dates_and_hours() {
        assert_eq!(short_date(date(2022, 2, 5)), "02-05");
        assert_eq!(format_hours(1.5), "1.5h");
        assert_eq!(format_hours(40.0), "40.0h");
        assert_eq!(weekday(Locale::Zh, 1), "星期二");
    }
}
