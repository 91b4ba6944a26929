use schemata::database::{SchemaRegistry, SqliteSyntaxProvider};
use schemata::lens::schema::SchemaLens;
use schemata::lens::utils::OutputFormat;
use schemata::{InstallationState, SchemataConfig};

use super::open_database;

pub fn run(config: &SchemataConfig, output_format: OutputFormat) {
    let db = open_database(config);
    let registry = SchemaRegistry::cms();
    let lens = SchemaLens::new(&db, &SqliteSyntaxProvider, &registry);

    let report = match lens.status() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    if output_format.is_json() {
        let json = if output_format == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        match json {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        }
        return;
    }

    println!("Database: {}", config.sqlite_path());
    println!("Status:   {}", report.headline());
    if let InstallationState::Drifted { missing_tables, .. } = &report.state {
        for table in missing_tables {
            println!("  missing: {}", table);
        }
    }
}
