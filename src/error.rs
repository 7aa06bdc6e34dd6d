use std::path::PathBuf;

use thiserror::Error;

/// A geometry operation failed on a specific feature pair.
///
/// Recovered at single-pair granularity during matching: the pair is
/// skipped and logged, the pass continues with the remaining candidates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryOpError {
    /// The block polygon encloses no area, so no fraction is defined.
    #[error("block geometry has zero area")]
    ZeroArea,

    /// An area or fraction came out NaN or infinite.
    #[error("geometry operation produced a non-finite value ({0})")]
    NonFinite(f64),
}

/// The requested county was not present in the county code table.
#[derive(Debug, Error)]
#[error("county {county:?} not found in {}", table.display())]
pub struct CountyLookupError {
    pub county: String,
    pub table: PathBuf,
}
