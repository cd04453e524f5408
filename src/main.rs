mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use cli::Command;
use tracing::info;

fn main() {
    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let _ = dotenvy::dotenv(); // load .env if present

    let result = match &cli.command {
        Command::Calculate(args) => {
            info!(amount = args.amount, json = args.json, "calculate starting");
            commands::run_calculate(args)
        }
        Command::Schedule(args) => commands::run_schedule(args),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "calculation failed");
        std::process::exit(1);
    }
}
