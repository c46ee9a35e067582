//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::add::AddArgs;
use crate::commands::layout::LayoutArgs;
use crate::commands::util::ViewArgs;

/// Weekly device usage grid.
///
/// Lays out recurring device usage slots on a day or week timeline and
/// summarizes them per month and year.
#[derive(Debug, Parser)]
#[command(name = "ug", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lay out the events of one or more periods.
    Layout(LayoutArgs),

    /// Print the range label for a period.
    Label(ViewArgs),

    /// Validate the events file and report rejected records.
    Check,

    /// Validate a new event and append it to the events file.
    Add(AddArgs),
}
