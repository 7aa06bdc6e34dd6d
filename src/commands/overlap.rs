use anyhow::Result;

use crate::cli::{Cli, OverlapArgs};
use crate::config::MatchConfig;

pub fn run(cli: &Cli, args: &OverlapArgs) -> Result<()> {
    let config = MatchConfig {
        state: args.state.clone(),
        county: args.county.clone(),
        census_dir: args.census_dir.clone(),
        precincts: args.precincts.clone(),
        output: args.output.clone(),
        summary: args.summary.clone(),
        verbose: cli.verbose,
    };

    crate::run::run(&config)?;
    Ok(())
}
