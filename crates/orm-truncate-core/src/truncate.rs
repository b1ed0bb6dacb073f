//! Truncate executor
//!
//! Empties the tables behind one entity or every discovered entity:
//!
//! 1. Optionally disable foreign-key checks
//! 2. Resolve, filter and look up each entity, then run the dialect's
//!    truncate batch for its table
//! 3. Re-enable foreign-key checks, even when step 2 failed
//!
//! Per-entity problems never abort the run. They become `Skipped` or
//! `Failed` outcomes in the returned [`TruncateReport`].

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::TruncateConfig;
use crate::connection::SqlConnection;
use crate::error::{Error, Result};
use crate::metadata::{EntityDiscovery, MetadataProvider, TypeResolver};
use crate::names;
use crate::report::{NullReporter, Outcome, Reporter, SkipReason, TruncateReport};
use crate::resolver::EntityResolver;

/// Per-call switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncateOptions {
    /// Disable foreign-key checks around the run
    pub ignore_foreign_keys: bool,
    /// Truncate every discovered entity, ignoring any target
    pub all_tables: bool,
    /// Treat a missing target as a request for all tables
    pub all_when_untargeted: bool,
}

impl Default for TruncateOptions {
    fn default() -> Self {
        Self {
            ignore_foreign_keys: false,
            all_tables: false,
            all_when_untargeted: true,
        }
    }
}

/// Truncate executor borrowing its configuration and collaborators
pub struct Truncator<'a> {
    config: &'a TruncateConfig,
    options: TruncateOptions,
    types: &'a dyn TypeResolver,
    metadata: &'a dyn MetadataProvider,
    discovery: &'a dyn EntityDiscovery,
    connection: &'a dyn SqlConnection,
    reporter: &'a dyn Reporter,
}

impl<'a> Truncator<'a> {
    /// Create an executor using `catalog` for type checks, metadata and discovery
    pub fn new<C>(
        config: &'a TruncateConfig,
        catalog: &'a C,
        connection: &'a dyn SqlConnection,
    ) -> Self
    where
        C: TypeResolver + MetadataProvider + EntityDiscovery,
    {
        Self {
            config,
            options: TruncateOptions::default(),
            types: catalog,
            metadata: catalog,
            discovery: catalog,
            connection,
            reporter: &NullReporter,
        }
    }

    pub fn with_options(mut self, options: TruncateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_reporter(mut self, reporter: &'a dyn Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replace the metadata provider
    pub fn with_metadata(mut self, metadata: &'a dyn MetadataProvider) -> Self {
        self.metadata = metadata;
        self
    }

    /// Replace the discovery service
    pub fn with_discovery(mut self, discovery: &'a dyn EntityDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Truncate `target`, or every discovered entity
    ///
    /// All tables are processed when `all_tables` is set or `target` is
    /// `None`. A `None` target with `all_when_untargeted` turned off fails
    /// with [`Error::InvalidTarget`] before any statement runs.
    pub fn truncate(&self, target: Option<&str>) -> Result<TruncateReport> {
        let target = match (target, self.options.all_tables) {
            (_, true) => None,
            (Some(entity), false) => Some(entity),
            (None, false) if self.options.all_when_untargeted => None,
            (None, false) => return Err(Error::InvalidTarget),
        };

        let dialect = self.connection.dialect();

        if self.options.ignore_foreign_keys {
            self.connection
                .execute_batch(dialect.disable_foreign_key_checks())?;
            debug!("Foreign key checks disabled");
        }

        let result = match target {
            None => self.truncate_all(),
            Some(entity) => Ok(TruncateReport {
                discovered: 0,
                outcomes: vec![self.truncate_one(entity)],
            }),
        };

        if self.options.ignore_foreign_keys {
            match self
                .connection
                .execute_batch(dialect.enable_foreign_key_checks())
            {
                Ok(()) => debug!("Foreign key checks re-enabled"),
                Err(e) if result.is_ok() => return Err(e),
                Err(e) => warn!("Failed to re-enable foreign key checks: {}", e),
            }
        }

        result
    }

    /// Truncate every entity discovered in the configured namespaces
    ///
    /// Does not touch foreign-key checks; see [`Truncator::truncate`].
    pub fn truncate_all(&self) -> Result<TruncateReport> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for namespace in self.config.namespaces() {
            for name in self.discovery.list_entities(namespace, true)? {
                let name = names::normalize(&name);
                if seen.insert(name.clone()) {
                    candidates.push(name);
                }
            }
        }

        info!(
            "Discovered {} types in {} namespaces",
            candidates.len(),
            self.config.namespaces().len()
        );

        let mut report = TruncateReport {
            discovered: candidates.len(),
            outcomes: Vec::with_capacity(candidates.len()),
        };

        for entity in candidates {
            let outcome = match self.config.filter().exclusion(&entity) {
                Some(exclusion) => self.skip(entity, SkipReason::Excluded { exclusion }),
                None => self.truncate_one(&entity),
            };
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    /// Truncate the table behind a single entity reference
    ///
    /// Never fails: resolution, exclusion, metadata and SQL problems are
    /// returned as the outcome.
    pub fn truncate_one(&self, entity: &str) -> Outcome {
        let resolver = EntityResolver::new(self.config.namespaces(), self.types);

        let Some(resolved) = resolver.resolve(entity) else {
            return self.skip(names::normalize(entity), SkipReason::Unresolved);
        };

        if let Some(exclusion) = self.config.filter().exclusion(&resolved) {
            return self.skip(resolved, SkipReason::Excluded { exclusion });
        }

        if !self.types.is_entity(&resolved) {
            let message = format!("{} is not a mapped entity", resolved);
            return self.skip(resolved, SkipReason::NotAnEntity { message });
        }

        let table = match self.metadata.table_name(&resolved) {
            Ok(table) => table,
            Err(e) => {
                return self.skip(
                    resolved,
                    SkipReason::NotAnEntity {
                        message: e.to_string(),
                    },
                )
            }
        };

        self.reporter.writeln(&format!("Truncating: {}", table));
        let sql = self.connection.dialect().truncate_table(&table);

        match self.connection.execute_batch(&sql) {
            Ok(()) => {
                info!("Truncated {} ({})", table, resolved);
                Outcome::Truncated {
                    entity: resolved,
                    table,
                }
            }
            Err(e) => {
                warn!("Failed to truncate {} ({}): {}", table, resolved, e);
                self.reporter
                    .writeln(&format!("Ignoring {}: {}", resolved, e));
                Outcome::Failed {
                    entity: resolved,
                    table,
                    error: e.to_string(),
                }
            }
        }
    }

    fn skip(&self, entity: String, reason: SkipReason) -> Outcome {
        debug!("Skipping {}: {}", entity, reason);
        self.reporter
            .writeln(&format!("Skipping {}: {}", entity, reason));
        Outcome::Skipped { entity, reason }
    }
}
