//! Progress reporting and per-entity outcomes

use serde::Serialize;

use crate::filter::Exclusion;

/// Line-oriented progress sink
///
/// Purely observational: nothing the executor does depends on it.
pub trait Reporter {
    fn writeln(&self, message: &str);
}

/// Discards every line (the default)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn writeln(&self, _message: &str) {}
}

/// Forwards lines to `tracing` at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn writeln(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Why an entity was left alone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// No namespace produced a known type
    Unresolved,
    /// Matched an ignore rule
    Excluded { exclusion: Exclusion },
    /// Resolved to a type without table metadata
    NotAnEntity { message: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unresolved => write!(f, "not found in any entity namespace"),
            Self::Excluded { exclusion } => write!(f, "{}", exclusion),
            Self::NotAnEntity { message } => write!(f, "{}", message),
        }
    }
}

/// Result of processing one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Truncated {
        entity: String,
        table: String,
    },
    Skipped {
        entity: String,
        reason: SkipReason,
    },
    Failed {
        entity: String,
        table: String,
        error: String,
    },
}

impl Outcome {
    pub fn entity(&self) -> &str {
        match self {
            Self::Truncated { entity, .. }
            | Self::Skipped { entity, .. }
            | Self::Failed { entity, .. } => entity,
        }
    }
}

/// Everything a truncate call did
#[derive(Debug, Clone, Default, Serialize)]
pub struct TruncateReport {
    /// Entities found by discovery (zero for single-entity runs)
    pub discovered: usize,
    pub outcomes: Vec<Outcome>,
}

impl TruncateReport {
    /// Tables that were emptied, in execution order
    pub fn truncated_tables(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                Outcome::Truncated { table, .. } => Some(table.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn truncated_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Truncated { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}
