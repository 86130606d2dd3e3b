//! Command-line entry point for the kaigyo line breaker

use clap::Parser;
use kaigyo_cli::commands::Commands;

/// Unicode line breaking (UAX #14) from the command line
#[derive(Debug, Parser)]
#[command(name = "kaigyo", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Segment(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    }
}
