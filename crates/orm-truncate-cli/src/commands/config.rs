//! Config command

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;

use super::core::{load_config, LoadedConfig};

/// Print the resolved configuration
pub fn cmd_config(
    config_path: Option<&Path>,
    namespaces: &[String],
    add_namespaces: &[String],
) -> Result<()> {
    let loaded = load_config(config_path, namespaces, add_namespaces)?;
    print!("{}", render_config(&loaded)?);
    Ok(())
}

/// Render the configuration, namespaces listed highest priority first
pub fn render_config(loaded: &LoadedConfig) -> Result<String> {
    let config = &loaded.config;
    let mut out = String::new();

    match loaded.source {
        Some(ref path) => writeln!(out, "📄 Config: {}", path.display())?,
        None => writeln!(out, "📄 Config: (command line only)")?,
    }

    writeln!(out)?;
    writeln!(out, "Entity namespaces (highest priority first):")?;
    for (i, ns) in config.namespaces().iter().rev().enumerate() {
        writeln!(out, "   {}. {}", i + 1, ns)?;
    }

    writeln!(out)?;
    writeln!(out, "Ignored classes:")?;
    if config.filter().classes().is_empty() {
        writeln!(out, "   (none)")?;
    }
    for class in config.filter().classes() {
        writeln!(out, "   - {}", class)?;
    }

    writeln!(out)?;
    match config.exclude_pattern_source() {
        Some(pattern) => writeln!(out, "Ignore pattern: {}", pattern)?,
        None => writeln!(out, "Ignore pattern: (none)")?,
    }

    Ok(out)
}
