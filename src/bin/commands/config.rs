use schemata::config::{format_size, get_database_info, DatabaseInfo};
use schemata::lens::utils::OutputFormat;
use schemata::{InstallationState, SchemataConfig};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ConfigInfo {
    config_file: String,
    data_dir: String,
    engine: String,
    database: DatabaseInfo,
}

pub fn run(config: &SchemataConfig, output_format: OutputFormat) {
    let info = ConfigInfo {
        config_file: SchemataConfig::config_file_path(),
        data_dir: config.data_dir.clone(),
        engine: config.engine.to_string(),
        database: get_database_info(config),
    };

    if output_format.is_json() {
        let json = if output_format == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(&info)
        } else {
            serde_json::to_string(&info)
        };
        match json {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        }
        return;
    }

    println!("Configuration:");
    println!("  Config file:    {}", info.config_file);
    for line in config.summary().lines() {
        println!("  {}", line);
    }

    println!();
    println!("Database:");
    let db = &info.database;
    if !db.exists {
        println!("  not created yet");
        return;
    }
    if let Some(size) = db.size_bytes {
        println!("  Size:           {}", format_size(size));
    }
    let state = match &db.installation {
        Some(InstallationState::Installed) => "installed".to_string(),
        Some(InstallationState::NotInstalled) => "not installed".to_string(),
        Some(InstallationState::Drifted {
            missing_tables,
            error_count,
        }) => format!(
            "drifted ({} missing tables, {} errors)",
            missing_tables.len(),
            error_count
        ),
        None => "unreadable".to_string(),
    };
    println!("  Schema:         {}", state);
}
