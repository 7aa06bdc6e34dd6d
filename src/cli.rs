use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Precinct/census-block overlap CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "precinctmap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match a county's precincts to its census blocks
    Overlap(OverlapArgs),

    /// Resolve a state/county pair to its FIPS codes
    Lookup(LookupArgs),
}

#[derive(Args, Debug)]
pub struct OverlapArgs {
    /// Precinct polygon shapefile
    #[arg(value_hint = ValueHint::FilePath)]
    pub precincts: PathBuf,

    /// Two-letter state postal code (longer input is truncated)
    #[arg(long, default_value = "wa")]
    pub state: String,

    /// County name, with or without the "County" suffix
    #[arg(long, default_value = "king")]
    pub county: String,

    /// Directory with per-state census block data
    #[arg(long, default_value = "census_blocks", value_hint = ValueHint::DirPath)]
    pub census_dir: PathBuf,

    /// Output report path (overwritten if it exists)
    #[arg(short, long, default_value = "map.csv", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Also write a JSON run summary to this path
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub summary: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Two-letter state postal code
    #[arg(long, default_value = "wa")]
    pub state: String,

    /// County name
    #[arg(long, default_value = "king")]
    pub county: String,

    /// Directory with per-state census block data
    #[arg(long, default_value = "census_blocks", value_hint = ValueHint::DirPath)]
    pub census_dir: PathBuf,
}
