//! SQLite connection backend

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::connection::{Dialect, SqlConnection};
use crate::error::{Error, Result};

/// A single SQLite connection with foreign keys enforced
pub struct SqliteConnection {
    conn: Connection,
    dialect: Dialect,
}

impl SqliteConnection {
    /// Open an existing database file
    ///
    /// Never creates a database: truncating a freshly created empty file
    /// would silently do nothing.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", path.display()),
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!("Opened SQLite database {}", path.display());
        Self::from_connection(conn)
    }

    /// In-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wrap an open connection, enabling foreign keys
    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let mut this = Self {
            conn,
            dialect: Dialect::Sqlite { sequences: false },
        };
        this.refresh_dialect()?;
        Ok(this)
    }

    /// Re-detect `sqlite_sequence`, which appears once an AUTOINCREMENT table exists
    pub fn refresh_dialect(&mut self) -> Result<()> {
        let sequences: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence')",
            [],
            |row| row.get(0),
        )?;
        self.dialect = Dialect::Sqlite { sequences };
        Ok(())
    }

    /// Get the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl SqlConnection for SqliteConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn execute_batch(&self, sql: &str) -> Result<()> {
        debug!("Executing: {}", sql);
        self.conn.execute_batch(sql)?;
        Ok(())
    }
}
