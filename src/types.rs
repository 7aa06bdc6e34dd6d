use std::sync::Arc;

use ahash::AHashMap;
use geo::MultiPolygon;

/// One census block's spatial record. Created when the county loads and
/// owned by the catalog until some precinct fully consumes it.
#[derive(Debug, Clone)]
pub struct Block {
    /// Stable identifier (GEOID), unique within a run.
    pub id: Arc<str>,
    pub geometry: MultiPolygon<f64>,
}

/// An electoral precinct polygon. Read once per run, never mutated.
#[derive(Debug, Clone)]
pub struct Precinct {
    /// Name from the source feature; not guaranteed unique.
    pub name: Arc<str>,
    pub geometry: MultiPolygon<f64>,
}

/// Per-precinct mapping from block id to the fraction of that block's
/// area enclosed by the precinct. Every recorded fraction is in
/// `(0.0, 1.0]`; sub-1% overlaps are never recorded.
pub type OverlapResult = AHashMap<Arc<str>, f64>;
