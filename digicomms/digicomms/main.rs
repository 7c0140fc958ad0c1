mod commands;
mod utils;
pub use commands::capacity::CapacityCommand;
pub use commands::core::CoreCommand;
pub use commands::demand::DemandCommand;
pub use commands::dryrun::DryrunCommand;
pub use commands::evaluate::EvaluateCommand;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = match &cli.command {
        Commands::Core(core_command) => core_command.run(),
        Commands::Capacity(capacity_command) => capacity_command.run(),
        Commands::Demand(demand_command) => demand_command.run(),
        Commands::Evaluate(evaluate_command) => evaluate_command.run(),
        Commands::Dryrun(config_command) => config_command.run(),
    } {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    };
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify exchanges and build the fixed core network
    Core(commands::CoreCommand),
    /// Estimate mobile network capacity per area
    Capacity(commands::CapacityCommand),
    /// Estimate busy hour mobile data demand per area
    Demand(commands::DemandCommand),
    /// Compare demand with capacity per area
    Evaluate(commands::EvaluateCommand),
    /// Validate a config and print the resolved values
    Dryrun(commands::DryrunCommand),
}
