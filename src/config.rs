use crate::database::{DatabaseConn, DatabaseEngine, InstallationState, SchemaCreation, SchemaRegistry};
use anyhow::{anyhow, Result};
use config::Config;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

pub struct SchemataConfig {
    /// Path to the directory holding the SQLite database
    pub data_dir: String,

    /// File name of the SQLite database inside `data_dir`
    pub database_file: String,

    /// Engine whose dialect `script` emits by default
    pub engine: DatabaseEngine,
}

const DEFAULT_DATABASE_FILE: &str = "schemata.sqlite3";

const EMPTY_CONFIG: &str = r#"### schemata configuration file

### directory holding the SQLite database
# data_dir = "~/.schemata"

### database file name inside data_dir
# database_file = "schemata.sqlite3"

### default dialect for generated DDL scripts: sqlite, sqlserver or mysql
# engine = "sqlite"
"#;

fn home_dir() -> Result<String> {
    Ok(dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not find home directory"))?
        .to_str()
        .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
        .to_owned())
}

impl Default for SchemataConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        Self {
            data_dir: format!("{}/.schemata", home_dir),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            engine: DatabaseEngine::default(),
        }
    }
}

impl SchemataConfig {
    /// Function to create and initialize a new configuration
    pub fn new(path: &Option<String>) -> Result<SchemataConfig> {
        let mut builder = Config::builder();

        // By default use $HOME/.schemata/schemata.toml as the configuration file path
        let schemata_dir = format!("{}/.schemata", home_dir()?);

        // Add in toml configuration file
        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                std::fs::create_dir_all(schemata_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create schemata directory: {}", e))?;
                let p = format!("{}/schemata.toml", schemata_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // Add in settings from the environment (with a prefix of SCHEMATA)
        // E.g., `SCHEMATA_ENGINE=mysql ./schemata script` would emit MySQL DDL
        builder = builder.add_source(config::Environment::with_prefix("SCHEMATA"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        Self::from_settings(&config, &schemata_dir)
    }

    fn from_settings(config: &HashMap<String, String>, default_dir: &str) -> Result<Self> {
        let data_dir = match config.get("data_dir") {
            Some(p) => expand_home(p)?,
            None => default_dir.to_string(),
        };

        let database_file = config
            .get("database_file")
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_DATABASE_FILE.to_string());

        let engine = match config.get("engine") {
            Some(e) => e
                .parse::<DatabaseEngine>()
                .map_err(|e| anyhow!("Invalid engine in configuration: {}", e))?,
            None => DatabaseEngine::default(),
        };

        Ok(SchemataConfig {
            data_dir,
            database_file,
            engine,
        })
    }

    /// Get the path to the SQLite database file
    pub fn sqlite_path(&self) -> String {
        let data_dir = self.data_dir.trim_end_matches('/');
        format!("{}/{}", data_dir, self.database_file)
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        [
            format!("Data Directory:     {}", self.data_dir),
            format!("SQLite Path:        {}", self.sqlite_path()),
            format!("Script Engine:      {}", self.engine),
        ]
        .join("\n")
    }

    /// Get the config file path
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.schemata/schemata.toml", home_dir)
    }
}

fn expand_home(path: &str) -> Result<String> {
    match path.strip_prefix('~') {
        Some(rest) => Ok(format!("{}{}", home_dir()?, rest)),
        None => Ok(path.to_string()),
    }
}

// =============================================================================
// Database info (used by the config and status commands)
// =============================================================================

/// Information about the configured SQLite database
#[derive(Debug, Serialize, Clone)]
pub struct DatabaseInfo {
    pub path: String,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<InstallationState>,
}

/// Get SQLite database information
///
/// The database is only opened if the file already exists.
pub fn get_database_info(config: &SchemataConfig) -> DatabaseInfo {
    let path = config.sqlite_path();
    let exists = Path::new(&path).exists();
    let size_bytes = if exists {
        std::fs::metadata(&path).ok().map(|m| m.len())
    } else {
        None
    };

    let installation = if exists {
        DatabaseConn::open_path(&path).ok().and_then(|db| {
            let registry = SchemaRegistry::cms();
            let syntax = DatabaseEngine::Sqlite.syntax_provider();
            let engine = SchemaCreation::new(&db, syntax.as_ref(), &registry);
            engine.validate_schema().ok().map(|r| r.installation_state())
        })
    } else {
        None
    };

    DatabaseInfo {
        path,
        exists,
        size_bytes,
        installation,
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
