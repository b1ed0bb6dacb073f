//! orm-truncate Core Library
//!
//! Empties the database tables behind ORM entity classes:
//! - Entity name resolution across an ordered namespace list
//! - Exclusion by class list and regex
//! - Truncate executor with foreign-key check toggling
//! - Static entity registry (mapping file) for type checks, metadata and discovery
//! - SQL dialects (MySQL, SQLite) and a SQLite connection backend

pub mod config;
pub mod connection;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod names;
pub mod report;
pub mod resolver;
pub mod sqlite;
pub mod truncate;

/// Test utilities including a statement-recording connection
#[cfg(test)]
pub mod test_utils;

pub use config::{TruncateConfig, TruncateConfigBuilder};
pub use connection::{Dialect, SqlConnection};
pub use error::{Error, Result};
pub use filter::{Exclusion, ExclusionFilter};
pub use metadata::{
    EntityDiscovery, EntityKind, EntityRegistry, MetadataProvider, RegisteredType, TypeResolver,
};
pub use report::{NullReporter, Outcome, Reporter, SkipReason, TracingReporter, TruncateReport};
pub use resolver::EntityResolver;
pub use sqlite::SqliteConnection;
pub use truncate::{TruncateOptions, Truncator};
