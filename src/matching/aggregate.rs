use std::sync::Arc;

use ahash::AHashMap;

use crate::types::OverlapResult;

/// Coverage totals above this are reported as suspicious. For a county
/// whose precincts partition space, no block should be assigned much more
/// than its whole area; anything past 110% points at double counting or
/// malformed input geometry.
pub const SUSPICIOUS_COVERAGE: f64 = 1.1;

/// Per-block overlap totals summed across every precinct processed.
/// Detection only: totals are reported, never corrected.
#[derive(Debug, Clone, Default)]
pub struct AggregateCoverage {
    totals: AHashMap<Arc<str>, f64>,
}

impl AggregateCoverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one precinct's result into the running totals. The same block
    /// id showing up under several precincts is expected and additive.
    pub fn accumulate(&mut self, result: &OverlapResult) {
        for (id, fraction) in result {
            *self.totals.entry(id.clone()).or_insert(0.0) += fraction;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Total assigned coverage for one block, if any precinct claimed it.
    pub fn total(&self, id: &str) -> Option<f64> {
        self.totals.get(id).copied()
    }

    /// Blocks whose summed coverage exceeds `threshold`, sorted by id so
    /// reports are stable.
    pub fn suspicious(&self, threshold: f64) -> Vec<(Arc<str>, f64)> {
        let mut flagged: Vec<(Arc<str>, f64)> = self
            .totals
            .iter()
            .filter(|(_, total)| **total > threshold)
            .map(|(id, total)| (id.clone(), *total))
            .collect();
        flagged.sort_by(|a, b| a.0.cmp(&b.0));
        flagged
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{AggregateCoverage, SUSPICIOUS_COVERAGE};
    use crate::types::OverlapResult;

    fn result_for(pairs: &[(&str, f64)]) -> OverlapResult {
        pairs
            .iter()
            .map(|(id, fraction)| (Arc::from(*id), *fraction))
            .collect()
    }

    #[test]
    fn empty_input_flags_nothing() {
        let coverage = AggregateCoverage::new();
        assert!(coverage.is_empty());
        assert!(coverage.suspicious(SUSPICIOUS_COVERAGE).is_empty());
    }

    #[test]
    fn totals_add_across_precincts() {
        let mut coverage = AggregateCoverage::new();
        coverage.accumulate(&result_for(&[("B1", 0.6), ("B2", 1.0)]));
        coverage.accumulate(&result_for(&[("B1", 0.6)]));

        assert_eq!(coverage.len(), 2);
        assert!((coverage.total("B1").unwrap() - 1.2).abs() < 1e-9);
        assert!((coverage.total("B2").unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(coverage.total("B3"), None);
    }

    #[test]
    fn double_claimed_block_is_suspicious() {
        let mut coverage = AggregateCoverage::new();
        coverage.accumulate(&result_for(&[("B1", 0.6)]));
        coverage.accumulate(&result_for(&[("B1", 0.6)]));

        let flagged = coverage.suspicious(SUSPICIOUS_COVERAGE);
        assert_eq!(flagged.len(), 1);
        assert_eq!(&*flagged[0].0, "B1");
        assert!((flagged[0].1 - 1.2).abs() < 1e-9);
    }

    #[test]
    fn threshold_is_strict() {
        let mut coverage = AggregateCoverage::new();
        coverage.accumulate(&result_for(&[("B1", 0.6)]));
        coverage.accumulate(&result_for(&[("B1", 0.5)]));

        assert!(coverage.suspicious(SUSPICIOUS_COVERAGE).is_empty());
    }

    #[test]
    fn suspicious_output_is_sorted_by_id() {
        let mut coverage = AggregateCoverage::new();
        coverage.accumulate(&result_for(&[("B9", 2.0), ("B1", 2.0), ("B5", 2.0)]));

        let ids: Vec<String> = coverage
            .suspicious(SUSPICIOUS_COVERAGE)
            .into_iter()
            .map(|(id, _)| id.to_string())
            .collect();
        assert_eq!(ids, vec!["B1", "B5", "B9"]);
    }
}
