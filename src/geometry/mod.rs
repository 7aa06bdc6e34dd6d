mod ops;

pub use ops::{GeometryOps, PlanarOps, SpatialRelation};

use std::sync::Arc;

use geo::Rect;
use rstar::{AABB, RTreeObject};

/// R-tree entry pairing a block id with its bounding rectangle.
#[derive(Debug, Clone)]
pub struct BlockEnvelope {
    id: Arc<str>,
    bounds: Rect<f64>,
}

impl BlockEnvelope {
    pub fn new(id: Arc<str>, bounds: Rect<f64>) -> Self {
        Self { id, bounds }
    }

    #[inline]
    pub fn id(&self) -> &Arc<str> {
        &self.id
    }
}

impl RTreeObject for BlockEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bounds.min().into(), self.bounds.max().into())
    }
}
