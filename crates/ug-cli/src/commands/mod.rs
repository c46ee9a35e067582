//! CLI subcommand implementations.

pub mod add;
pub mod check;
pub mod label;
pub mod layout;
pub mod util;
