pub mod aggregate;
pub mod catalog;
pub mod matcher;

pub use aggregate::{AggregateCoverage, SUSPICIOUS_COVERAGE};
pub use catalog::BlockCatalog;
pub use matcher::{MIN_OVERLAP_FRACTION, NEAR_FULL_FRACTION, match_precinct};

use std::sync::Arc;

use ahash::AHashMap;

use crate::types::OverlapResult;

/// Precinct results in source order, keyed by precinct name.
///
/// Precinct names are not guaranteed unique; a repeated name replaces the
/// earlier result in place (the caller is expected to warn).
#[derive(Debug, Default)]
pub struct PrecinctMap {
    names: Vec<Arc<str>>,
    results: Vec<OverlapResult>,
    index: AHashMap<Arc<str>, usize>,
}

impl PrecinctMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one precinct's result. Returns false when the name was
    /// already present and its result got replaced.
    pub fn insert(&mut self, name: Arc<str>, result: OverlapResult) -> bool {
        match self.index.get(&name) {
            Some(&at) => {
                self.results[at] = result;
                false
            }
            None => {
                self.index.insert(name.clone(), self.names.len());
                self.names.push(name);
                self.results.push(result);
                true
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&OverlapResult> {
        self.index.get(name).map(|&at| &self.results[at])
    }

    /// Iterate results in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &OverlapResult)> {
        self.names.iter().zip(self.results.iter())
    }

    pub fn results(&self) -> impl Iterator<Item = &OverlapResult> {
        self.results.iter()
    }
}
