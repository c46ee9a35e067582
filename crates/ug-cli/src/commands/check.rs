//! Check command: validate the events file and list every rejected record.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::store::{self, LoadedEvents};

/// Prints the validation report. Returns `true` when nothing was rejected.
pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<bool> {
    let loaded = store::load(&config.events_path)?;
    writeln!(writer, "Events file: {}", config.events_path.display())?;
    write_report(writer, &loaded)?;
    Ok(loaded.rejected_count() == 0)
}

fn write_report<W: Write>(writer: &mut W, loaded: &LoadedEvents) -> Result<()> {
    writeln!(writer, "Accepted: {}", loaded.report.accepted)?;
    writeln!(writer, "Rejected: {}", loaded.rejected_count())?;
    for (_, problem) in loaded.problems() {
        writeln!(writer, "- {problem}")?;
    }
    Ok(())
}
