//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::path::{Path, PathBuf};

use clap::Parser;
use rusqlite::Connection;
use tempfile::TempDir;

use crate::cli::{Cli, Commands, TruncateArgs};
use crate::commands;

const CONFIG: &str = r#"
entityNamespaces = ["App\\Entity"]

[ignore]
classes = ["App\\Entity\\AuditLog"]
regex = "/Interface$/"
"#;

const MAPPING: &str = r#"
[[entity]]
class = "App\\Entity\\Product"

[[entity]]
class = "App\\Entity\\ProductInterface"
kind = "interface"

[[entity]]
class = "App\\Entity\\Order"
table = "orders"

[[entity]]
class = "App\\Entity\\OrderLine"

[[entity]]
class = "App\\Entity\\AuditLog"

[[entity]]
class = "App\\Entity\\Acme\\Coupon"
"#;

/// Temp workspace with a database, config and mapping
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("orm-truncate.toml"), CONFIG).unwrap();
        std::fs::write(dir.path().join("entities.toml"), MAPPING).unwrap();

        let conn = Connection::open(dir.path().join("app.db")).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE product (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL);
            CREATE TABLE orders (id INTEGER PRIMARY KEY AUTOINCREMENT, placed TEXT);
            CREATE TABLE order_line (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_id INTEGER NOT NULL REFERENCES orders(id),
                product_id INTEGER NOT NULL REFERENCES product(id)
            );
            CREATE TABLE audit_log (id INTEGER PRIMARY KEY AUTOINCREMENT, message TEXT);
            CREATE TABLE coupon (id INTEGER PRIMARY KEY AUTOINCREMENT, code TEXT);
            INSERT INTO product (name) VALUES ('widget'), ('gadget');
            INSERT INTO orders (placed) VALUES ('2024-01-01');
            INSERT INTO order_line (order_id, product_id) VALUES (1, 1), (1, 2);
            INSERT INTO audit_log (message) VALUES ('created');
            INSERT INTO coupon (code) VALUES ('SAVE10');
            "#,
        )
        .unwrap();

        Self { dir }
    }

    fn db(&self) -> PathBuf {
        self.dir.path().join("app.db")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("orm-truncate.toml")
    }

    fn mapping(&self) -> PathBuf {
        self.dir.path().join("entities.toml")
    }

    fn count(&self, table: &str) -> i64 {
        let conn = Connection::open(self.db()).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    fn truncate(&self, args: &TruncateArgs) -> anyhow::Result<()> {
        commands::cmd_truncate(&self.db(), Some(&self.config()), &self.mapping(), args)
    }
}

fn args_for(entity: Option<&str>) -> TruncateArgs {
    TruncateArgs {
        entity: entity.map(str::to_string),
        ..Default::default()
    }
}

// ========== Argument Parsing Tests ==========

fn parse_truncate(args: &[&str]) -> TruncateArgs {
    let argv = std::iter::once("orm-truncate")
        .chain(std::iter::once("truncate"))
        .chain(args.iter().copied());
    match Cli::try_parse_from(argv).unwrap().command {
        Commands::Truncate(args) => args,
        _ => panic!("expected truncate command"),
    }
}

#[test]
fn test_parse_defaults() {
    let args = parse_truncate(&[]);
    assert!(args.entity.is_none());
    assert!(!args.ignore_fk);
    assert!(!args.all);
    assert!(!args.explicit);
    assert!(args.namespaces.is_empty());
}

#[test]
fn test_parse_optional_value_flags() {
    let args = parse_truncate(&["Product", "--ignore-fk", "-a"]);
    assert_eq!(args.entity.as_deref(), Some("Product"));
    assert!(args.ignore_fk);
    assert!(args.all);

    let args = parse_truncate(&["--ignore-fk=false", "--all=false"]);
    assert!(!args.ignore_fk);
    assert!(!args.all);

    let args = parse_truncate(&["--ignore"]);
    assert!(args.ignore_fk);
}

#[test]
fn test_parse_namespaces() {
    let args = parse_truncate(&[
        "--namespace",
        "App\\Entity",
        "--add-namespace",
        "App\\Entity\\Acme",
        "--add-ns",
        "Vendor\\Entity",
    ]);
    assert_eq!(args.namespaces, vec!["App\\Entity"]);
    assert_eq!(args.add_namespaces, vec!["App\\Entity\\Acme", "Vendor\\Entity"]);
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "orm-truncate",
        "truncate",
        "--db",
        "test.db",
        "--mapping",
        "map.toml",
        "-v",
    ])
    .unwrap();
    assert_eq!(cli.db, PathBuf::from("test.db"));
    assert_eq!(cli.mapping, PathBuf::from("map.toml"));
    assert!(cli.verbose);
    assert!(cli.config.is_none());
}

// ========== Truncate Command Tests ==========

#[test]
fn test_cmd_truncate_single_entity() {
    let fx = Fixture::new();
    fx.truncate(&args_for(Some("OrderLine"))).unwrap();

    assert_eq!(fx.count("order_line"), 0);
    assert_eq!(fx.count("orders"), 1);
    assert_eq!(fx.count("product"), 2);
}

#[test]
fn test_cmd_truncate_slash_separated_entity() {
    let fx = Fixture::new();
    fx.truncate(&args_for(Some("App/Entity/OrderLine"))).unwrap();
    assert_eq!(fx.count("order_line"), 0);
}

#[test]
fn test_cmd_truncate_all_with_ignore_fk() {
    let fx = Fixture::new();
    let args = TruncateArgs {
        ignore_fk: true,
        ..Default::default()
    };
    fx.truncate(&args).unwrap();

    assert_eq!(fx.count("product"), 0);
    assert_eq!(fx.count("orders"), 0);
    assert_eq!(fx.count("order_line"), 0);
    assert_eq!(fx.count("coupon"), 0);
    // Excluded by ignore.classes
    assert_eq!(fx.count("audit_log"), 1);
}

#[test]
fn test_cmd_truncate_all_continues_past_fk_failures() {
    let fx = Fixture::new();
    fx.truncate(&args_for(None)).unwrap();

    // product and orders are referenced by order_line, which is only
    // emptied after them in mapping order
    assert_eq!(fx.count("product"), 2);
    assert_eq!(fx.count("orders"), 1);
    assert_eq!(fx.count("order_line"), 0);
    assert_eq!(fx.count("coupon"), 0);
}

#[test]
fn test_cmd_truncate_strict_reports_failures() {
    let fx = Fixture::new();
    let args = TruncateArgs {
        strict: true,
        ..Default::default()
    };
    let result = fx.truncate(&args);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("failed to truncate"));
}

#[test]
fn test_cmd_truncate_explicit_requires_target() {
    let fx = Fixture::new();
    let args = TruncateArgs {
        explicit: true,
        ..Default::default()
    };
    let result = fx.truncate(&args);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid target"));
    assert_eq!(fx.count("coupon"), 1);
}

#[test]
fn test_cmd_truncate_added_namespace() {
    let fx = Fixture::new();
    let args = TruncateArgs {
        entity: Some("Coupon".to_string()),
        add_namespaces: vec!["App\\Entity\\Acme".to_string()],
        ..Default::default()
    };
    fx.truncate(&args).unwrap();
    assert_eq!(fx.count("coupon"), 0);
}

#[test]
fn test_cmd_truncate_unknown_entity_is_not_an_error() {
    let fx = Fixture::new();
    fx.truncate(&args_for(Some("Ghost"))).unwrap();
    assert_eq!(fx.count("coupon"), 1);
}

#[test]
fn test_cmd_truncate_json_output() {
    let fx = Fixture::new();
    let args = TruncateArgs {
        entity: Some("OrderLine".to_string()),
        json: true,
        ..Default::default()
    };
    fx.truncate(&args).unwrap();
    assert_eq!(fx.count("order_line"), 0);
}

#[test]
fn test_cmd_truncate_missing_database() {
    let fx = Fixture::new();
    let missing = fx.dir.path().join("missing.db");
    let result = commands::cmd_truncate(
        &missing,
        Some(&fx.config()),
        &fx.mapping(),
        &args_for(Some("Product")),
    );
    assert!(result.is_err());
    assert!(!missing.exists());
}

#[test]
fn test_cmd_truncate_missing_mapping() {
    let fx = Fixture::new();
    let result = commands::cmd_truncate(
        &fx.db(),
        Some(&fx.config()),
        Path::new("/nonexistent/entities.toml"),
        &args_for(Some("Product")),
    );
    assert!(result.is_err());
    assert_eq!(fx.count("product"), 2);
}

// ========== Config Command Tests ==========

#[test]
fn test_load_config_cli_namespace_order() {
    let fx = Fixture::new();
    let loaded = commands::load_config(
        Some(&fx.config()),
        &["Vendor\\Entity".to_string()],
        &["App\\Entity\\Acme".to_string()],
    )
    .unwrap();

    assert_eq!(
        loaded.config.namespaces(),
        ["App\\Entity", "Vendor\\Entity", "App\\Entity\\Acme"]
    );
    assert_eq!(loaded.source, Some(fx.config()));
}

#[test]
fn test_load_config_missing_explicit_file() {
    let fx = Fixture::new();
    let result = commands::load_config(Some(&fx.dir.path().join("nope.toml")), &[], &[]);
    assert!(result.is_err());
}

#[test]
fn test_build_config_without_file_or_namespaces() {
    let result = commands::build_config(None, &[], &[]);
    let err = result.err().unwrap().to_string();
    assert!(err.contains("No configuration found"));
}

#[test]
fn test_build_config_from_command_line_only() {
    let loaded = commands::build_config(
        None,
        &[],
        &["App\\Entity".to_string()],
    )
    .unwrap();

    assert_eq!(loaded.source, None);
    assert_eq!(loaded.config.namespaces(), ["App\\Entity"]);
    assert!(loaded.config.filter().classes().is_empty());
    assert!(loaded.config.filter().pattern().is_none());
    assert!(!loaded.config.filter().is_excluded("App\\Entity\\ProductInterface"));
}

#[test]
fn test_render_config_lists_highest_priority_first() {
    let fx = Fixture::new();
    let loaded = commands::load_config(
        Some(&fx.config()),
        &[],
        &["App\\Entity\\Acme".to_string()],
    )
    .unwrap();

    let output = commands::render_config(&loaded).unwrap();

    let acme = output.find("1. App\\Entity\\Acme").unwrap();
    let app = output.find("2. App\\Entity").unwrap();
    assert!(acme < app);
    assert!(output.contains("   - App\\Entity\\AuditLog"));
    assert!(output.contains("Ignore pattern: /Interface$/"));
}

#[test]
fn test_cmd_config() {
    let fx = Fixture::new();
    let result = commands::cmd_config(Some(&fx.config()), &[], &[]);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_config_invalid_file() {
    let fx = Fixture::new();
    let path = fx.dir.path().join("bad.toml");
    std::fs::write(&path, "entityNamespaces = []").unwrap();
    let result = commands::cmd_config(Some(&path), &[], &[]);
    assert!(result.is_err());
}
