use schemata::database::{DatabaseConn, SchemaRegistry, SqliteSyntaxProvider};
use schemata::lens::schema::SchemaLens;
use schemata::lens::utils::{format_rows, OutputFormat};

use super::print_or_exit;

pub fn run(output_format: OutputFormat) {
    let registry = SchemaRegistry::cms();
    let db = match DatabaseConn::open_in_memory() {
        Ok(db) => db,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    let lens = SchemaLens::new(&db, &SqliteSyntaxProvider, &registry);

    print_or_exit(format_rows(&lens.table_rows(), output_format));
}
