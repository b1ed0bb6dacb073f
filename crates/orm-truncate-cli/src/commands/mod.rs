//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (load_config, load_registry, open_db)
//! - `truncate` - The truncate command
//! - `config` - Show the resolved configuration

pub mod config;
pub mod core;
pub mod truncate;

// Re-export command functions for main.rs
pub use config::*;
pub use self::core::*;
pub use truncate::*;
