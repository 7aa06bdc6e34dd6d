use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::matching::PrecinctMap;

/// Counts and data-quality signals from one overlap run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub state_fips: String,
    pub county_fips: String,
    pub precinct_count: usize,
    pub blocks_total: usize,
    pub blocks_remaining: usize,
    /// Blocks whose summed coverage exceeded the suspicious threshold.
    pub suspicious: BTreeMap<String, f64>,
}

/// Write one line per precinct, in source order:
/// `<name>, (<block> <fraction>),(<block> <fraction>),...`
///
/// Pairs within a line are sorted by block id so the output is
/// deterministic. Any existing file at `path` is overwritten.
pub fn write_report(path: &Path, map: &PrecinctMap) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[report] failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    for (name, result) in map.iter() {
        let mut pairs: Vec<(&Arc<str>, f64)> =
            result.iter().map(|(id, fraction)| (id, *fraction)).collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let row = pairs
            .iter()
            .map(|(id, fraction)| format!("({id} {fraction:.6})"))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "{name}, {row}")?;
    }

    out.flush()
        .with_context(|| format!("[report] failed to finish writing {}", path.display()))
}

/// Write the machine-readable run summary as pretty JSON.
pub fn write_summary(path: &Path, report: &RunReport) -> Result<()> {
    let bytes =
        serde_json::to_vec_pretty(report).context("[report] failed to serialize run summary")?;
    std::fs::write(path, bytes)
        .with_context(|| format!("[report] failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;
    use std::sync::Arc;

    use super::{RunReport, write_report, write_summary};
    use crate::matching::PrecinctMap;
    use crate::types::OverlapResult;

    fn result_for(pairs: &[(&str, f64)]) -> OverlapResult {
        pairs
            .iter()
            .map(|(id, fraction)| (Arc::from(*id), *fraction))
            .collect()
    }

    #[test]
    fn report_lines_match_the_expected_format() {
        let mut map = PrecinctMap::new();
        map.insert(
            Arc::from("PRECINCT 36"),
            result_for(&[("B2", 0.5), ("B1", 1.0)]),
        );
        map.insert(Arc::from("PRECINCT 37"), result_for(&[("B2", 0.5)]));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.csv");
        write_report(&path, &map).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "PRECINCT 36, (B1 1.000000),(B2 0.500000)\nPRECINCT 37, (B2 0.500000)\n"
        );
    }

    #[test]
    fn precinct_with_no_blocks_still_gets_a_line() {
        let mut map = PrecinctMap::new();
        map.insert(Arc::from("EMPTY"), result_for(&[]));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.csv");
        write_report(&path, &map).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "EMPTY, \n");
    }

    #[test]
    fn existing_report_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.csv");
        fs::write(&path, "stale contents\n").unwrap();

        let mut map = PrecinctMap::new();
        map.insert(Arc::from("P"), result_for(&[("B1", 1.0)]));
        write_report(&path, &map).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "P, (B1 1.000000)\n");
    }

    #[test]
    fn summary_serializes_to_json() {
        let report = RunReport {
            state_fips: "53".to_string(),
            county_fips: "033".to_string(),
            precinct_count: 2,
            blocks_total: 100,
            blocks_remaining: 7,
            suspicious: BTreeMap::from([("B1".to_string(), 1.2)]),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary(&path, &report).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["county_fips"], "033");
        assert_eq!(value["blocks_remaining"], 7);
        assert!((value["suspicious"]["B1"].as_f64().unwrap() - 1.2).abs() < 1e-9);
    }
}
