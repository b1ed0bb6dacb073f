//! Truncate command

use std::path::Path;

use anyhow::{bail, Result};
use orm_truncate_core::{NullReporter, Reporter, TruncateOptions, TruncateReport, Truncator};
use tracing::debug;

use super::core::{load_config, load_registry, open_db};
use crate::cli::TruncateArgs;

const TITLE: &str = "Truncate ORM database tables from the command line";

/// Prints reporter lines to stdout
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn writeln(&self, message: &str) {
        println!("   {}", message);
    }
}

pub fn cmd_truncate(
    db_path: &Path,
    config_path: Option<&Path>,
    mapping: &Path,
    args: &TruncateArgs,
) -> Result<()> {
    let loaded = load_config(config_path, &args.namespaces, &args.add_namespaces)?;
    let registry = load_registry(mapping)?;
    let db = open_db(db_path)?;

    let options = TruncateOptions {
        ignore_foreign_keys: args.ignore_fk,
        all_tables: args.all,
        all_when_untargeted: !args.explicit,
    };
    debug!("Truncate options: {:?}", options);

    let reporter: &dyn Reporter = if args.json {
        &NullReporter
    } else {
        &ConsoleReporter
    };

    if !args.json {
        println!("🧹 {}", TITLE);
        if options.ignore_foreign_keys {
            println!("   Foreign key checks disabled during truncate");
        }
        match args.entity {
            Some(ref entity) if !options.all_tables => println!("   Truncating {}", entity),
            Some(_) => println!("   Truncating ALL database tables"),
            None if options.all_tables || options.all_when_untargeted => {
                println!("   Truncating ALL database tables")
            }
            None => {}
        }
        println!();
    }

    let report = Truncator::new(&loaded.config, &registry, &db)
        .with_options(options)
        .with_reporter(reporter)
        .truncate(args.entity.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if args.strict && report.has_failures() {
        bail!("{} table(s) failed to truncate", report.failed_count());
    }

    Ok(())
}

fn print_summary(report: &TruncateReport) {
    println!();
    if report.discovered > 0 {
        println!("   Entities discovered: {}", report.discovered);
    }
    println!("   Tables truncated: {}", report.truncated_count());
    println!("   Skipped: {}", report.skipped_count());
    if report.has_failures() {
        println!("   ⚠️  Failed: {}", report.failed_count());
    }
    println!();
    println!("✅ Truncate complete.");
}
