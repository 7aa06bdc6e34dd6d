use anyhow::Result;

use crate::census::lookup;
use crate::cli::{Cli, LookupArgs};

pub fn run(cli: &Cli, args: &LookupArgs) -> Result<()> {
    if cli.verbose > 0 {
        eprintln!(
            "[lookup] state {:?} county {:?} in {}",
            lookup::normalize_state(&args.state),
            lookup::normalize_county(&args.county),
            args.census_dir.display()
        );
    }

    let code = lookup::resolve(&args.census_dir, &args.state, &args.county)?;
    println!("{} {}", code.state_fips, code.county_fips);
    Ok(())
}
