use std::sync::Arc;

use geo::BoundingRect;

use crate::geometry::{GeometryOps, SpatialRelation};
use crate::matching::BlockCatalog;
use crate::types::{OverlapResult, Precinct};

/// Overlap fractions below this are treated as noise and dropped.
pub const MIN_OVERLAP_FRACTION: f64 = 0.01;

/// Fractions above this are promoted to full containment, covering
/// near-containment that an exact containment test fails to detect.
pub const NEAR_FULL_FRACTION: f64 = 0.99;

/// Classify every candidate block against one precinct and record overlap
/// fractions. Fully consumed blocks are evicted from the catalog, since no
/// other precinct can meaningfully claim them.
///
/// The scan is two-phase: eviction candidates are collected during the
/// read pass and applied afterward, so the pass never mutates the set it
/// is walking. A geometry failure on one pair skips only that pair.
pub fn match_precinct<G: GeometryOps>(
    ops: &G,
    catalog: &mut BlockCatalog,
    precinct: &Precinct,
) -> OverlapResult {
    let mut claimed = OverlapResult::default();

    let Some(bounds) = precinct.geometry.bounding_rect() else {
        eprintln!("[match] precinct {:?} has no extent, skipping", precinct.name);
        return claimed;
    };

    let mut consumed: Vec<Arc<str>> = Vec::new();
    for id in catalog.candidates(&bounds) {
        let Some(block) = catalog.get(&id) else {
            continue;
        };
        match ops.relation(&precinct.geometry, block) {
            Ok(SpatialRelation::Disjoint) => {}
            Ok(SpatialRelation::Contains) => {
                claimed.insert(id.clone(), 1.0);
                consumed.push(id);
            }
            Ok(SpatialRelation::Overlaps) => match ops.overlap_fraction(&precinct.geometry, block)
            {
                Ok(fraction) if fraction < MIN_OVERLAP_FRACTION => {}
                Ok(fraction) if fraction > NEAR_FULL_FRACTION => {
                    claimed.insert(id.clone(), 1.0);
                    consumed.push(id);
                }
                Ok(fraction) => {
                    claimed.insert(id.clone(), fraction);
                }
                Err(err) => {
                    eprintln!("[match] {} / {id}: {err}, pair skipped", precinct.name);
                }
            },
            Err(err) => {
                eprintln!("[match] {} / {id}: {err}, pair skipped", precinct.name);
            }
        }
    }

    for id in &consumed {
        catalog.remove(id);
    }
    claimed
}
