use clap::Args;
use schemata::database::{SchemaRegistry, SqliteSyntaxProvider};
use schemata::lens::schema::SchemaLens;
use schemata::lens::utils::OutputFormat;
use schemata::SchemataConfig;

use super::{open_database, print_or_exit};

/// Arguments for the Validate command
#[derive(Args)]
pub struct ValidateArgs {
    /// Exit with status 2 when drift is found
    #[clap(long)]
    pub strict: bool,

    /// Print the grouped error summary instead of the report tables
    #[clap(long)]
    pub summary: bool,
}

pub fn run(config: &SchemataConfig, args: ValidateArgs, output_format: OutputFormat) {
    let db = open_database(config);
    let registry = SchemaRegistry::cms();
    let lens = SchemaLens::new(&db, &SqliteSyntaxProvider, &registry);

    let result = match lens.validate() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    if args.summary && !output_format.is_json() {
        println!("{}", result.error_summary());
    } else {
        print_or_exit(lens.format_validation(&result, output_format));
    }

    if args.strict && !result.is_valid() {
        std::process::exit(2);
    }
}
