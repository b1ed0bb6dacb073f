//! SQL connection collaborator and engine dialects

use crate::error::Result;

/// Statement text that differs between database engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Mysql,
    /// `sequences` is true when the database has a `sqlite_sequence` table
    Sqlite { sequences: bool },
}

impl Dialect {
    pub fn disable_foreign_key_checks(&self) -> &'static str {
        match self {
            Self::Mysql => "SET FOREIGN_KEY_CHECKS = 0;",
            Self::Sqlite { .. } => "PRAGMA foreign_keys = OFF;",
        }
    }

    pub fn enable_foreign_key_checks(&self) -> &'static str {
        match self {
            Self::Mysql => "SET FOREIGN_KEY_CHECKS = 1;",
            Self::Sqlite { .. } => "PRAGMA foreign_keys = ON;",
        }
    }

    /// Batch that empties `table` and resets its auto-increment counter
    ///
    /// SQLite table names are case-insensitive, so the `sqlite_sequence`
    /// row is matched with `NOCASE`.
    pub fn truncate_table(&self, table: &str) -> String {
        match self {
            Self::Mysql => format!(
                "TRUNCATE TABLE {}; ALTER TABLE {} AUTO_INCREMENT = 0;",
                table, table
            ),
            Self::Sqlite { sequences: true } => format!(
                "DELETE FROM {}; DELETE FROM sqlite_sequence WHERE name = {} COLLATE NOCASE;",
                quote_identifier(table),
                quote_literal(table)
            ),
            Self::Sqlite { sequences: false } => {
                format!("DELETE FROM {};", quote_identifier(table))
            }
        }
    }
}

/// A connection statements are executed on
///
/// Implementations execute the whole batch or fail; the executor never
/// retries.
pub trait SqlConnection {
    fn dialect(&self) -> Dialect;

    /// Execute one or more `;`-separated statements
    fn execute_batch(&self, sql: &str) -> Result<()>;
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
