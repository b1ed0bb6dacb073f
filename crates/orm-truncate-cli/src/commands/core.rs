//! Shared command utilities
//!
//! This module contains:
//! - `load_config` - Locate, parse and extend the truncate configuration
//! - `build_config` - Build the configuration from a located file
//! - `load_registry` - Load the entity mapping file
//! - `open_db` - Open the SQLite database

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use orm_truncate_core::config::{locate_config, CONFIG_FILE_NAME};
use orm_truncate_core::{EntityRegistry, SqliteConnection, TruncateConfig, TruncateConfigBuilder};

/// A built configuration and the file it came from
pub struct LoadedConfig {
    pub config: TruncateConfig,
    pub source: Option<PathBuf>,
}

/// Locate the configuration file and build the configuration
pub fn load_config(
    explicit: Option<&Path>,
    namespaces: &[String],
    add_namespaces: &[String],
) -> Result<LoadedConfig> {
    let source = locate_config(explicit)?;
    build_config(source, namespaces, add_namespaces)
}

/// Build the configuration from an optional file and command-line namespaces
///
/// `--namespace` values are appended before `--add-namespace` values, so
/// the latter have the highest resolution priority. Without a file, the
/// command line must supply at least one namespace and nothing is ignored.
pub fn build_config(
    source: Option<PathBuf>,
    namespaces: &[String],
    add_namespaces: &[String],
) -> Result<LoadedConfig> {
    let builder = match source {
        Some(ref path) => TruncateConfigBuilder::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None if namespaces.is_empty() && add_namespaces.is_empty() => bail!(
            "No configuration found. Create {} or pass --config, --namespace or --add-namespace",
            CONFIG_FILE_NAME
        ),
        None => TruncateConfigBuilder::default(),
    };

    let config = builder
        .namespaces(namespaces.iter().cloned())
        .namespaces(add_namespaces.iter().cloned())
        .build()
        .context("Invalid configuration")?;

    Ok(LoadedConfig { config, source })
}

/// Load the entity mapping
pub fn load_registry(mapping: &Path) -> Result<EntityRegistry> {
    EntityRegistry::from_file(mapping)
        .with_context(|| format!("Failed to load entity mapping {}", mapping.display()))
}

/// Open an existing database
pub fn open_db(db_path: &Path) -> Result<SqliteConnection> {
    SqliteConnection::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))
}
