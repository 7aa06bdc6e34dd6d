use std::collections::BTreeMap;

use anyhow::Result;

use crate::census::{blocks, lookup, precincts};
use crate::config::MatchConfig;
use crate::geometry::PlanarOps;
use crate::matching::{
    AggregateCoverage, BlockCatalog, PrecinctMap, SUSPICIOUS_COVERAGE, match_precinct,
};
use crate::report::{self, RunReport};

/// Drive a full overlap run: resolve the county, load its blocks, match
/// every precinct in source order, sanity-check aggregate coverage, and
/// write the report.
///
/// Precincts are matched sequentially against the one shared catalog, so
/// the first precinct to fully contain a block wins it and eviction needs
/// no further coordination. Nothing is written before a fatal error can
/// still occur; the report lands exactly once, at the end.
pub fn run(config: &MatchConfig) -> Result<RunReport> {
    let code = lookup::resolve(&config.census_dir, &config.state, &config.county)?;
    println!("county code: {}", code.county_fips);

    let state = lookup::normalize_state(&config.state);
    let shp = blocks::block_shapefile_path(&config.census_dir, &state, &code.state_fips)?;
    if config.verbose > 0 {
        eprintln!("[blocks] reading {}", shp.display());
    }
    let loaded = blocks::load_county_blocks(&shp, &code.county_fips, config.verbose)?;
    let mut catalog = BlockCatalog::new(loaded)?;
    let blocks_total = catalog.len();

    let precinct_list = precincts::load_precincts(&config.precincts, config.verbose)?;
    println!(
        "Matching {} precincts against {} census blocks",
        precinct_list.len(),
        blocks_total
    );

    let ops = PlanarOps;
    let mut results = PrecinctMap::new();
    for precinct in &precinct_list {
        println!("Looking at {} matching {} blocks", precinct.name, catalog.len());
        let claimed = match_precinct(&ops, &mut catalog, precinct);
        if !results.insert(precinct.name.clone(), claimed) {
            eprintln!(
                "[match] duplicate precinct name {:?}: replacing the earlier result",
                precinct.name
            );
        }
    }

    let blocks_remaining = catalog.len();
    println!("{blocks_remaining} census blocks were not fully assigned.");
    if blocks_remaining * 5 > blocks_total {
        eprintln!(
            "[match] {blocks_remaining} of {blocks_total} blocks left unassigned; \
             more than 20% usually means the precinct and block geometries do not line up"
        );
    }

    let mut coverage = AggregateCoverage::new();
    for claimed in results.results() {
        coverage.accumulate(claimed);
    }
    let suspicious = coverage.suspicious(SUSPICIOUS_COVERAGE);
    for (id, total) in &suspicious {
        eprintln!("[aggregate] block {id} assigned {total:.6} total coverage across precincts");
    }

    report::write_report(&config.output, &results)?;
    println!(
        "Wrote {} precinct rows -> {}",
        results.len(),
        config.output.display()
    );

    let summary = RunReport {
        state_fips: code.state_fips,
        county_fips: code.county_fips,
        precinct_count: results.len(),
        blocks_total,
        blocks_remaining,
        suspicious: suspicious
            .into_iter()
            .map(|(id, total)| (id.to_string(), total))
            .collect::<BTreeMap<_, _>>(),
    };
    if let Some(path) = &config.summary {
        report::write_summary(path, &summary)?;
        if config.verbose > 0 {
            eprintln!("[report] summary -> {}", path.display());
        }
    }
    Ok(summary)
}
