//! Test utilities for orm-truncate-core
//!
//! - `RecordingConnection` captures every statement batch instead of
//!   running it, and can be told to fail on batches mentioning a table
//! - `RecordingReporter` captures reporter lines
//! - `fixture_registry` is a small mapping shared by tests

use std::cell::RefCell;

use crate::connection::{Dialect, SqlConnection};
use crate::error::{Error, Result};
use crate::metadata::{EntityKind, EntityRegistry};
use crate::report::Reporter;

/// Connection that records statements instead of executing them
pub struct RecordingConnection {
    dialect: Dialect,
    statements: RefCell<Vec<String>>,
    fail_on: Vec<String>,
}

impl RecordingConnection {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            statements: RefCell::new(Vec::new()),
            fail_on: Vec::new(),
        }
    }

    pub fn mysql() -> Self {
        Self::new(Dialect::Mysql)
    }

    /// Fail any batch containing `needle` (after recording it)
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on.push(needle.to_string());
        self
    }

    /// Statements issued so far, in order
    pub fn statements(&self) -> Vec<String> {
        self.statements.borrow().clone()
    }
}

impl SqlConnection for RecordingConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn execute_batch(&self, sql: &str) -> Result<()> {
        self.statements.borrow_mut().push(sql.to_string());
        match self.fail_on.iter().find(|needle| sql.contains(needle.as_str())) {
            Some(needle) => Err(Error::Execution(format!("simulated failure on {}", needle))),
            None => Ok(()),
        }
    }
}

/// Reporter that keeps every line
#[derive(Default)]
pub struct RecordingReporter {
    lines: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Reporter for RecordingReporter {
    fn writeln(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}

/// Registry used across tests
///
/// | class | kind | table |
/// |---|---|---|
/// | `App\Entity\Product` | entity | `product` |
/// | `App\Entity\ProductInterface` | interface | |
/// | `App\Entity\Order` | entity | `orders` |
/// | `App\Entity\OrderLine` | entity | `order_line` |
/// | `App\Entity\Acme\Product` | entity | `acme_product` |
pub fn fixture_registry() -> EntityRegistry {
    EntityRegistry::new()
        .entity("App\\Entity\\Product", Some("product"))
        .and_then(|r| r.non_entity("App\\Entity\\ProductInterface", EntityKind::Interface))
        .and_then(|r| r.entity("App\\Entity\\Order", Some("orders")))
        .and_then(|r| r.entity("App\\Entity\\OrderLine", None))
        .and_then(|r| r.entity("App\\Entity\\Acme\\Product", Some("acme_product")))
        .expect("fixture registry is valid")
}
