mod cli;
mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use error::Result;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();

    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("Interlines CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let result = match cli.command {
        Commands::Check(args) => {
            info!("Dispatching to 'check' command.");
            commands::check::run(args)
        }
        Commands::Defaults => {
            info!("Dispatching to 'defaults' command.");
            commands::defaults::run()
        }
    };

    if let Err(e) = &result {
        error!("Command failed: {}", e);
    }
    result
}
