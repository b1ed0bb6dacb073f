//! orm-truncate CLI - Empty ORM-mapped database tables
//!
//! Usage:
//!   orm-truncate truncate Product              Truncate one entity's table
//!   orm-truncate truncate --all --ignore-fk    Truncate every mapped table
//!   orm-truncate config                        Show the resolved configuration

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match cli.command {
        Commands::Truncate(ref args) => {
            commands::cmd_truncate(&cli.db, cli.config.as_deref(), &cli.mapping, args)
        }
        Commands::Config {
            ref namespaces,
            ref add_namespaces,
        } => commands::cmd_config(cli.config.as_deref(), namespaces, add_namespaces),
    }
}
