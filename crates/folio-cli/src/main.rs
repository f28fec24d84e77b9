//! Folio CLI - Command-line interface for portfolio valuation.
//!
//! # Usage
//!
//! ```bash
//! # Browse the reference universe
//! folio universe --sector technology
//!
//! # Screen for high-volatility mega caps
//! folio screen --market-cap mega --risk high
//!
//! # Value a lot file against the reference quotes
//! folio value --lots lots.yaml --as-of 2025-10-18
//!
//! # Export holdings to CSV
//! folio export --lots lots.json --output portfolio.csv
//!
//! # Interactive ledger
//! folio session
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::config::{config_path, Preferences};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let path = config_path(cli.config.as_deref())?;
    let prefs = Preferences::load(&path)?;

    // Explicit --format wins over the saved preference
    let format = cli.format.unwrap_or(prefs.format);
    output::set_quiet(cli.quiet);
    if !prefs.use_colors {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Universe(args) => commands::universe::execute(args, format)?,
        Commands::Search(args) => commands::search::execute(args, format)?,
        Commands::Screen(args) => commands::screen::execute(args, format, &prefs)?,
        Commands::Value(args) => commands::value::execute(args, format, &prefs)?,
        Commands::Export(args) => commands::export::execute(args, &prefs)?,
        Commands::Session(args) => commands::session::execute(args, format, &prefs)?,
        Commands::Config(args) => commands::config::execute(args, format, &path)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
