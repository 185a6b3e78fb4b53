use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use slotledger::config::LedgerConfig;
use slotledger::error::LedgerResult;
use slotledger::machines::MachineRegistry;
use slotledger::store::JsonFileStore;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    config: LedgerConfig,

    /// JSON settings file; flags typed on the command line override it.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the machine table.
    Machines,
    /// Valuate a session and store it.
    Add(cmd::add::AddArgs),
    /// List stored records.
    List(cmd::list::ListArgs),
    /// Cumulative medal-difference series.
    Chart(cmd::chart::ChartArgs),
    /// Overall and per-machine totals.
    Summary(cmd::list::ListArgs),
    /// Delete a stored record.
    Delete(cmd::delete::DeleteArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, matches: &clap::ArgMatches) -> LedgerResult<()> {
    let config = match &cli.config_file {
        Some(path) => {
            info!("⚙️  Loading settings from: {}", path);
            let mut file_config = LedgerConfig::load_from_file(path)?;
            file_config.merge_from_cli(&cli.config, matches);
            file_config
        }
        None => cli.config.clone(),
    };

    // Validated even when a table override is in use.
    let builtin = MachineRegistry::builtin();

    let custom_registry;
    let registry = match &config.store.machines {
        Some(path) => {
            info!("🎰 Loading machine table: {}", path);
            custom_registry = MachineRegistry::load_from_file(path)?;
            &custom_registry
        }
        None => builtin,
    };

    let mut store = JsonFileStore::open(&config.store.records)?;

    match cli.command {
        Commands::Machines => {
            reports::print_machines(registry);
            Ok(())
        }
        Commands::Add(args) => cmd::add::run(args, registry, &config, &mut store),
        Commands::List(args) => cmd::list::run(args, &store),
        Commands::Chart(args) => cmd::chart::run(args, &config, &store),
        Commands::Summary(args) => cmd::summary::run(args, registry, &store),
        Commands::Delete(args) => cmd::delete::run(args, &mut store),
    }
}
