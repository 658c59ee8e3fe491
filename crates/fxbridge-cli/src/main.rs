//! fxbridge CLI - run audio files through effect-engine filters.

mod commands;
mod engines;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fxbridge")]
#[command(author, version, about = "fxbridge effect filter CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a 16-bit WAV file through one or more filters
    Process(commands::process::ProcessArgs),

    /// List filters and their options
    Options(commands::options::OptionsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Options(args) => commands::options::run(args),
    }
}
