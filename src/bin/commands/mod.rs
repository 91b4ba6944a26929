pub mod config;
pub mod install;
pub mod script;
pub mod status;
pub mod tables;
pub mod uninstall;
pub mod validate;

use schemata::database::{ensure_data_dir, DatabaseConn};
use schemata::SchemataConfig;

/// Open the configured SQLite database, exiting on failure
pub(crate) fn open_database(config: &SchemataConfig) -> DatabaseConn {
    if let Err(e) = ensure_data_dir(&config.data_dir) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }

    match DatabaseConn::open_path(&config.sqlite_path()) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a rendered report, exiting on render failure
pub(crate) fn print_or_exit(rendered: anyhow::Result<String>) {
    match rendered {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    }
}
