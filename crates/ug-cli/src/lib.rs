//! Device usage grid CLI library.
//!
//! This crate provides the CLI interface over the `ug-core` layout engine.

mod cli;
pub mod commands;
mod config;
pub mod store;

pub use cli::{Cli, Commands};
pub use config::Config;
