//! Truncate configuration
//!
//! The configuration is an immutable value built once per invocation with
//! [`TruncateConfigBuilder`]. It can be seeded from a TOML file:
//!
//! ```toml
//! entityNamespaces = ["App\\Entity", "App\\Entity\\Acme"]
//!
//! [ignore]
//! classes = ["App\\Entity\\Product"]
//! regex = "/Interface$/"
//! ```
//!
//! ## Namespace priority
//!
//! Namespaces are kept in declaration order and resolution walks them from
//! last to first, so later namespaces win. Namespaces added through the
//! builder after loading a file (e.g. from the command line) are appended
//! and therefore take priority over the file's.
//!
//! ## Configuration Resolution
//!
//! 1. An explicit path (must exist)
//! 2. `./orm-truncate.toml`
//! 3. `<config dir>/orm-truncate/config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::filter::{self, ExclusionFilter};
use crate::names;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "orm-truncate.toml";

/// Validated, immutable truncate configuration
#[derive(Debug, Clone)]
pub struct TruncateConfig {
    namespaces: Vec<String>,
    filter: ExclusionFilter,
    exclude_pattern_source: Option<String>,
}

impl TruncateConfig {
    pub fn builder() -> TruncateConfigBuilder {
        TruncateConfigBuilder::default()
    }

    /// Namespaces in declaration order (lowest priority first)
    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn filter(&self) -> &ExclusionFilter {
        &self.filter
    }

    /// The exclude pattern as written in the configuration
    pub fn exclude_pattern_source(&self) -> Option<&str> {
        self.exclude_pattern_source.as_deref()
    }
}

/// Builder for [`TruncateConfig`]
#[derive(Debug, Clone, Default)]
pub struct TruncateConfigBuilder {
    namespaces: Vec<String>,
    exclude_classes: Vec<String>,
    exclude_pattern: Option<String>,
}

impl TruncateConfigBuilder {
    /// Parse a TOML config document
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut builder = Self::default().namespaces(raw.entity_namespaces.unwrap_or_default());

        if let Some(ignore) = raw.ignore {
            builder = builder.exclude_classes(ignore.classes.unwrap_or_default());
            if let Some(regex) = ignore.regex {
                builder = builder.exclude_pattern(regex);
            }
        }

        Ok(builder)
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        debug!("Loaded config from {}", path.display());
        Self::from_toml(&content)
    }

    /// Append one namespace (highest priority so far)
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.push(namespace.into());
        self
    }

    /// Append several namespaces in order
    pub fn namespaces(mut self, namespaces: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.namespaces.extend(namespaces.into_iter().map(Into::into));
        self
    }

    pub fn exclude_class(mut self, class: impl Into<String>) -> Self {
        self.exclude_classes.push(class.into());
        self
    }

    pub fn exclude_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude_classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Set the exclude pattern (replaces any earlier one)
    pub fn exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_pattern = Some(pattern.into());
        self
    }

    /// Validate and build the configuration
    ///
    /// Namespaces are normalized; a namespace declared twice keeps only its
    /// last position. Fails if no namespace remains or the pattern is invalid.
    pub fn build(self) -> Result<TruncateConfig> {
        let mut namespaces: Vec<String> = Vec::with_capacity(self.namespaces.len());
        for ns in self.namespaces.iter().map(|ns| names::normalize(ns)) {
            if ns.is_empty() {
                continue;
            }
            namespaces.retain(|existing| existing != &ns);
            namespaces.push(ns);
        }

        if namespaces.is_empty() {
            return Err(Error::Config(
                "entityNamespaces must contain at least one namespace".to_string(),
            ));
        }

        let pattern = self
            .exclude_pattern
            .as_deref()
            .map(filter::parse_pattern)
            .transpose()?;

        Ok(TruncateConfig {
            namespaces,
            filter: ExclusionFilter::new(self.exclude_classes, pattern),
            exclude_pattern_source: self.exclude_pattern,
        })
    }
}

/// Default user-level config path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("orm-truncate").join("config.toml"))
}

/// Find the config file to load
///
/// An explicit path must exist. Otherwise the working directory and then
/// the user config directory are checked; `None` if neither has a file.
pub fn locate_config(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Ok(Some(local));
    }

    Ok(default_config_path().filter(|p| p.exists()))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    entity_namespaces: Option<Vec<String>>,
    ignore: Option<RawIgnore>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawIgnore {
    classes: Option<Vec<String>>,
    regex: Option<String>,
}
