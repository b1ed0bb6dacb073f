//! CLI argument definitions using clap
//!
//! This module contains the clap structs for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// orm-truncate - Empty ORM-mapped database tables
#[derive(Parser)]
#[command(name = "orm-truncate")]
#[command(about = "Truncate database tables mapped from ORM entity classes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "app.db", global = true)]
    pub db: PathBuf,

    /// Config file (defaults to ./orm-truncate.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Entity mapping file
    #[arg(long, default_value = "entities.toml", global = true)]
    pub mapping: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clear database tables using truncate
    Truncate(TruncateArgs),

    /// Show the resolved configuration
    Config {
        /// Extra namespaces, as for `truncate --namespace`
        #[arg(long = "namespace", visible_alias = "ns")]
        namespaces: Vec<String>,

        /// Extra namespaces, as for `truncate --add-namespace`
        #[arg(long = "add-namespace", visible_alias = "add-ns")]
        add_namespaces: Vec<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct TruncateArgs {
    /// Entity class name (e.g. App/Entity/MyClass or MyClass)
    pub entity: Option<String>,

    /// Ignore foreign key checks: FOREIGN_KEY_CHECKS is disabled during truncate
    #[arg(
        long,
        visible_alias = "ignore",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub ignore_fk: bool,

    /// Truncate all tables (implied when no entity is given)
    #[arg(
        short,
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub all: bool,

    /// Namespace where entities live (appended to the configured namespaces)
    #[arg(long = "namespace", visible_alias = "ns")]
    pub namespaces: Vec<String>,

    /// Additional entity namespace (repeatable)
    #[arg(long = "add-namespace", visible_alias = "add-ns")]
    pub add_namespaces: Vec<String>,

    /// Require an entity or --all instead of treating a missing entity as --all
    #[arg(long)]
    pub explicit: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with an error if any table failed to truncate
    #[arg(long)]
    pub strict: bool,
}
