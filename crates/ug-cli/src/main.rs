use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ug_cli::commands::{add, check, label, layout};
use ug_cli::{Cli, Commands, Config};

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    // The only place the wall clock is read
    let today = chrono::Local::now().date_naive();
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Layout(args)) => {
            let config = load_config(cli.config.as_deref())?;
            layout::run(&mut stdout, args, &config, today)?;
        }
        Some(Commands::Label(args)) => {
            let config = load_config(cli.config.as_deref())?;
            label::run(&mut stdout, args, &config, today)?;
        }
        Some(Commands::Check) => {
            let config = load_config(cli.config.as_deref())?;
            if !check::run(&mut stdout, &config)? {
                anyhow::bail!("events file has rejected records");
            }
        }
        Some(Commands::Add(args)) => {
            let config = load_config(cli.config.as_deref())?;
            add::run(&mut stdout, args, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
