use clap::{Parser, Subcommand};
use schemata::lens::utils::OutputFormat;
use schemata::SchemataConfig;
use tracing::Level;

mod commands;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.schemata/schemata.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    /// Output format: table, markdown, json, json-pretty, json-line, psv
    #[clap(short, long, global = true, default_value = "table")]
    format: OutputFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create every schema table in the configured database.
    Install(commands::install::InstallArgs),

    /// Drop every schema table, dependents first.
    Uninstall(commands::uninstall::UninstallArgs),

    /// Compare the database with the schema and report drift.
    Validate(commands::validate::ValidateArgs),

    /// Show whether the schema is installed, missing or drifted.
    Status,

    /// Print the DDL that installs the schema on a given engine.
    Script(commands::script::ScriptArgs),

    /// List the schema tables in creation order.
    Tables,

    /// Show configuration and database file information.
    Config,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            // filter spans/events with level DEBUG or higher.
            .with_max_level(Level::DEBUG)
            .init();
    }

    let config = match SchemataConfig::new(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Install(args) => commands::install::run(&config, args, cli.format),
        Commands::Uninstall(args) => commands::uninstall::run(&config, args, cli.format),
        Commands::Validate(args) => commands::validate::run(&config, args, cli.format),
        Commands::Status => commands::status::run(&config, cli.format),
        Commands::Script(args) => commands::script::run(&config, args),
        Commands::Tables => commands::tables::run(cli.format),
        Commands::Config => commands::config::run(&config, cli.format),
    }
}
