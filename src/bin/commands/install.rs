use clap::Args;
use schemata::database::{CreationOutcome, SchemaRegistry, SqliteSyntaxProvider};
use schemata::lens::schema::SchemaLens;
use schemata::lens::utils::OutputFormat;
use schemata::SchemataConfig;
use serde_json::json;

use super::open_database;

/// Arguments for the Install command
#[derive(Args)]
pub struct InstallArgs {
    /// Validate the schema after installing it
    #[clap(long)]
    pub verify: bool,
}

pub fn run(config: &SchemataConfig, args: InstallArgs, output_format: OutputFormat) {
    let db = open_database(config);
    let registry = SchemaRegistry::cms();
    let lens = SchemaLens::new(&db, &SqliteSyntaxProvider, &registry);

    let tables = match lens.install() {
        Ok(CreationOutcome::Created { tables }) => tables,
        Ok(CreationOutcome::Cancelled) => {
            eprintln!("Installation cancelled.");
            return;
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    if output_format.is_json() {
        println!(
            "{}",
            json!({ "database": config.sqlite_path(), "created": tables })
        );
    } else {
        println!(
            "Installed {} tables into {}",
            tables.len(),
            config.sqlite_path()
        );
    }

    if args.verify {
        match lens.validate() {
            Ok(result) if result.is_valid() => {
                if !output_format.is_json() {
                    println!("Schema verified.");
                }
            }
            Ok(result) => {
                eprintln!("{}", result.error_summary());
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("ERROR: {}", e);
                std::process::exit(1);
            }
        }
    }
}
