//! Layout command: positioned events for Day and Week, aggregate grids for
//! Month and Year.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Args;
use serde::Serialize;
use ug_core::{
    DateCursor, Geometry, Layout, Locale, MonthGrid, UsageEvent, ViewMode, YearGrid, is_today,
    layout_periods, month_grid, year_grid,
};

use crate::Config;
use crate::commands::util::{ViewArgs, format_hours, short_date, weekday};
use crate::store;

#[derive(Debug, Args)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Number of consecutive periods to render.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub periods: u16,

    /// Date to highlight as today (YYYY-MM-DD). Defaults to the system date.
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// One rendered period.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Period {
    Timeline(Layout),
    Month { label: String, grid: MonthGrid },
    Year { label: String, grid: YearGrid },
}

pub fn run<W: Write>(
    writer: &mut W,
    args: &LayoutArgs,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    let loaded = store::load(&config.events_path)?;
    if loaded.rejected_count() > 0 {
        tracing::warn!(
            rejected = loaded.rejected_count(),
            "some records were left out; run `ug check` for details"
        );
    }

    let today = args.today.unwrap_or(today);
    let cursor = args.view.cursor(config.default_view, today);
    let periods = build_periods(
        loaded.schedule.events(),
        &cursor,
        usize::from(args.periods),
        config,
        today,
    )?;

    if args.json {
        let json = serde_json::to_string_pretty(&periods).context("failed to encode layout")?;
        writeln!(writer, "{json}")?;
        return Ok(());
    }

    for (i, period) in periods.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        write!(writer, "{}", format_period(period, config.locale, Some(today)))?;
    }
    Ok(())
}

/// Lays out `count` consecutive periods starting at `cursor`.
pub fn build_periods(
    events: &[UsageEvent],
    cursor: &DateCursor,
    count: usize,
    config: &Config,
    today: NaiveDate,
) -> Result<Vec<Period>> {
    let cursors = cursor.successors(count);
    let periods = match cursor.view_mode() {
        ViewMode::Day | ViewMode::Week => {
            let geometry =
                Geometry::new(config.row_height).context("invalid row_height in configuration")?;
            layout_periods(events, &cursors, &geometry, config.locale)?
                .into_iter()
                .map(Period::Timeline)
                .collect()
        }
        ViewMode::Month => cursors
            .iter()
            .map(|c| Period::Month {
                label: c.label(config.locale),
                grid: month_grid(c, events, Some(today)),
            })
            .collect(),
        ViewMode::Year => cursors
            .iter()
            .map(|c| Period::Year {
                label: c.label(config.locale),
                grid: year_grid(c, events, config.locale),
            })
            .collect(),
    };
    Ok(periods)
}

pub fn format_period(period: &Period, locale: Locale, today: Option<NaiveDate>) -> String {
    match period {
        Period::Timeline(layout) => format_timeline(layout, locale, today),
        Period::Month { label, grid } => format_month(label, grid),
        Period::Year { label, grid } => format_year(label, grid),
    }
}

fn format_timeline(layout: &Layout, locale: Locale, today: Option<NaiveDate>) -> String {
    let mut output = String::new();
    writeln!(output, "{} ({})", layout.label, layout.view).unwrap();

    for bucket in &layout.buckets {
        let lanes = match bucket.lane_count {
            1 => "1 lane".to_string(),
            n => format!("{n} lanes"),
        };
        let mark = if is_today(bucket.date, today) { " (today)" } else { "" };
        writeln!(
            output,
            "{} {}{mark}  {lanes}",
            weekday(locale, bucket.day_index),
            short_date(bucket.date)
        )
        .unwrap();

        if bucket.events.is_empty() {
            writeln!(output, "  (no events)").unwrap();
            continue;
        }
        for placed in &bucket.events {
            let event = &placed.event;
            writeln!(
                output,
                "  {:<4} {:>5} {:>5}  {:<18} lane {}  x {:.2}% w {:.2}%  y {:.1} h {:.1}",
                event.id().as_str(),
                event.start_label(),
                format_hours(event.duration()),
                event.device_name(),
                placed.lane,
                placed.rect.left_percent,
                placed.rect.width_percent,
                placed.rect.top_offset,
                placed.rect.height,
            )
            .unwrap();
        }
    }
    output
}

fn format_month(label: &str, grid: &MonthGrid) -> String {
    let mut output = String::new();
    writeln!(output, "{label}").unwrap();
    for week in grid.cells.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                if !cell.in_month {
                    return "   . ".to_string();
                }
                let mark = if cell.is_today { '*' } else { ' ' };
                format!("{:>2}{mark}{:>2}", cell.date.day(), cell.event_count)
            })
            .collect();
        writeln!(output, "{}", row.join(" ")).unwrap();
    }
    writeln!(output, "Total: {}", format_hours(grid.usage_hours())).unwrap();
    output
}

fn format_year(label: &str, grid: &YearGrid) -> String {
    let mut output = String::new();
    writeln!(output, "{label}").unwrap();
    for month in &grid.months {
        writeln!(
            output,
            "{:<4} {:>2} active days  {:>7}",
            month.name,
            month.active_days,
            format_hours(month.usage_hours)
        )
        .unwrap();
    }
    output
}
