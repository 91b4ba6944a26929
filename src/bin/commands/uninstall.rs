use clap::Args;
use schemata::database::{SchemaRegistry, SqliteSyntaxProvider};
use schemata::lens::schema::SchemaLens;
use schemata::lens::utils::OutputFormat;
use schemata::SchemataConfig;

use super::open_database;

/// Arguments for the Uninstall command
#[derive(Args)]
pub struct UninstallArgs {
    /// Skip confirmation prompt
    #[clap(long, short = 'y')]
    pub yes: bool,
}

pub fn run(config: &SchemataConfig, args: UninstallArgs, output_format: OutputFormat) {
    let UninstallArgs { yes } = args;

    // Confirmation prompt
    if !yes && !output_format.is_json() {
        eprintln!(
            "This will drop every schema table in {}",
            config.sqlite_path()
        );
        eprint!("Are you sure? [y/N] ");

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_ok() {
            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                eprintln!("Aborted.");
                return;
            }
        } else {
            eprintln!("Aborted.");
            return;
        }
    }

    let db = open_database(config);
    let registry = SchemaRegistry::cms();
    let lens = SchemaLens::new(&db, &SqliteSyntaxProvider, &registry);
    let summary = lens.uninstall();

    if output_format.is_json() {
        match serde_json::to_string(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        }
    } else {
        println!(
            "Dropped {} tables, {} already absent, {} failed",
            summary.dropped.len(),
            summary.absent.len(),
            summary.failed.len()
        );
        for table in &summary.failed {
            println!("  failed: {}", table);
        }
    }
}
