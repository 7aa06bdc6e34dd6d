use std::sync::Arc;

use ahash::AHashMap;
use anyhow::{Result, bail};
use geo::{BoundingRect, MultiPolygon, Rect};
use rstar::{AABB, RTree};

use crate::geometry::BlockEnvelope;
use crate::types::Block;

/// Mutable working set of candidate blocks for one county.
///
/// Membership lives in the id map. The R-tree over block envelopes is
/// built once and never rebuilt; eviction drops the map entry and stale
/// tree hits are filtered out during candidate queries, so removal stays
/// O(1). The set only ever shrinks over a run.
#[derive(Debug)]
pub struct BlockCatalog {
    blocks: AHashMap<Arc<str>, MultiPolygon<f64>>,
    rtree: RTree<BlockEnvelope>,
}

impl BlockCatalog {
    /// Build the catalog from loaded blocks. Ids must be unique since they
    /// key the working set. Blocks with no extent never become candidates.
    pub fn new(blocks: Vec<Block>) -> Result<Self> {
        let mut entries = AHashMap::with_capacity(blocks.len());
        let mut envelopes = Vec::with_capacity(blocks.len());
        for block in blocks {
            if let Some(bounds) = block.geometry.bounding_rect() {
                envelopes.push(BlockEnvelope::new(block.id.clone(), bounds));
            }
            if entries.insert(block.id.clone(), block.geometry).is_some() {
                bail!("duplicate block id {:?} in catalog", block.id);
            }
        }
        Ok(Self {
            blocks: entries,
            rtree: RTree::bulk_load(envelopes),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.blocks.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&MultiPolygon<f64>> {
        self.blocks.get(id)
    }

    /// Permanently evict a block; later lookups and candidate queries
    /// skip it. Returns false if the id was already gone.
    pub fn remove(&mut self, id: &str) -> bool {
        self.blocks.remove(id).is_some()
    }

    /// Ids of member blocks whose envelope intersects `bounds`.
    pub fn candidates(&self, bounds: &Rect<f64>) -> Vec<Arc<str>> {
        let query = AABB::from_corners(bounds.min().into(), bounds.max().into());
        self.rtree
            .locate_in_envelope_intersecting(&query)
            .filter(|envelope| self.blocks.contains_key(envelope.id()))
            .map(|envelope| envelope.id().clone())
            .collect()
    }

    /// Ids still in the working set, in arbitrary order.
    pub fn ids(&self) -> impl Iterator<Item = &Arc<str>> {
        self.blocks.keys()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use geo::{Coord, MultiPolygon, Rect};

    use super::BlockCatalog;
    use crate::types::Block;

    fn block(id: &str, x: f64, y: f64, size: f64) -> Block {
        Block {
            id: Arc::from(id),
            geometry: MultiPolygon(vec![
                Rect::new(
                    Coord { x, y },
                    Coord {
                        x: x + size,
                        y: y + size,
                    },
                )
                .to_polygon(),
            ]),
        }
    }

    fn query_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect<f64> {
        Rect::new(Coord { x: x0, y: y0 }, Coord { x: x1, y: y1 })
    }

    #[test]
    fn new_indexes_all_blocks() {
        let catalog =
            BlockCatalog::new(vec![block("a", 0.0, 0.0, 1.0), block("b", 5.0, 5.0, 1.0)]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("a"));
        assert!(catalog.get("b").is_some());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result =
            BlockCatalog::new(vec![block("a", 0.0, 0.0, 1.0), block("a", 5.0, 5.0, 1.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn candidates_respect_envelopes() {
        let catalog = BlockCatalog::new(vec![
            block("near", 0.0, 0.0, 1.0),
            block("far", 100.0, 100.0, 1.0),
        ])
        .unwrap();

        let hits = catalog.candidates(&query_rect(0.0, 0.0, 2.0, 2.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(&*hits[0], "near");
    }

    #[test]
    fn removal_is_permanent() {
        let mut catalog =
            BlockCatalog::new(vec![block("a", 0.0, 0.0, 1.0), block("b", 0.5, 0.5, 1.0)]).unwrap();

        assert!(catalog.remove("a"));
        assert!(!catalog.remove("a"));
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.contains("a"));
        assert!(catalog.get("a").is_none());

        // The stale R-tree entry must not resurface the evicted block.
        let hits = catalog.candidates(&query_rect(0.0, 0.0, 2.0, 2.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(&*hits[0], "b");
    }
}
