use anyhow::Result;
use clap::Parser;

use precinctmap::cli::{Cli, Commands};
use precinctmap::commands::{lookup, overlap};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Overlap(args) => overlap::run(&cli, args),
        Commands::Lookup(args) => lookup::run(&cli, args),
    }
}
