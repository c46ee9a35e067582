//! Label command: the range label of one period.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use crate::Config;
use crate::commands::util::ViewArgs;

pub fn run<W: Write>(writer: &mut W, args: &ViewArgs, config: &Config, today: NaiveDate) -> Result<()> {
    let cursor = args.cursor(config.default_view, today);
    writeln!(writer, "{}", cursor.label(config.locale))?;
    Ok(())
}
