use clap::Args;
use schemata::database::{DatabaseConn, DatabaseEngine, SchemaRegistry};
use schemata::lens::schema::SchemaLens;
use schemata::SchemataConfig;

/// Arguments for the Script command
#[derive(Args)]
pub struct ScriptArgs {
    /// Target engine: sqlite, sqlserver or mysql (defaults to the configured engine)
    #[clap(short, long)]
    pub engine: Option<DatabaseEngine>,
}

pub fn run(config: &SchemataConfig, args: ScriptArgs) {
    let engine = args.engine.unwrap_or(config.engine);
    let syntax = engine.syntax_provider();
    let registry = SchemaRegistry::cms();

    // DDL generation never touches the session
    let db = match DatabaseConn::open_in_memory() {
        Ok(db) => db,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    let lens = SchemaLens::new(&db, syntax.as_ref(), &registry);

    println!("-- schema for {} ({} tables)", engine, registry.len());
    println!("{}", lens.script());
}
