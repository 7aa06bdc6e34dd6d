use std::path::PathBuf;

/// Inputs for one overlap run, passed explicitly into [`run`](crate::run).
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Two-letter state postal code (longer input is truncated).
    pub state: String,
    /// County name, with or without the "County" suffix.
    pub county: String,
    /// Directory holding per-state census data (`<dir>/<state>/...`).
    pub census_dir: PathBuf,
    /// Precinct polygon shapefile.
    pub precincts: PathBuf,
    /// Report output path, overwritten if present.
    pub output: PathBuf,
    /// Optional JSON run-summary path.
    pub summary: Option<PathBuf>,
    /// Diagnostic verbosity, from repeated -v flags.
    pub verbose: u8,
}
