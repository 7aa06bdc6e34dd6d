#![doc = "Precinct to census-block overlap mapping"]
pub mod cli;
pub mod commands;

mod census;
mod common;
mod config;
mod error;
mod geometry;
mod matching;
mod report;
mod run;
mod types;

#[doc(inline)]
pub use config::MatchConfig;

#[doc(inline)]
pub use error::{CountyLookupError, GeometryOpError};

#[doc(inline)]
pub use geometry::{GeometryOps, PlanarOps, SpatialRelation};

#[doc(inline)]
pub use matching::{
    AggregateCoverage, BlockCatalog, PrecinctMap, SUSPICIOUS_COVERAGE, match_precinct,
};

#[doc(inline)]
pub use report::RunReport;

#[doc(inline)]
pub use run::run;

#[doc(inline)]
pub use types::{Block, OverlapResult, Precinct};
