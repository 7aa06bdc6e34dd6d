use geo::{Area, BooleanOps, MultiPolygon, Relate};

use crate::error::GeometryOpError;

/// Spatial relationship of a block to a precinct. The three cases are
/// mutually exclusive; containment wins over plain overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialRelation {
    /// No shared area (pure boundary touches count as disjoint).
    Disjoint,
    /// Shared area, but part of the block lies outside the precinct.
    Overlaps,
    /// The block lies entirely within the precinct.
    Contains,
}

/// The 2D geometry backend used during matching.
///
/// Every operation is fallible so that one degenerate feature pair can be
/// skipped without aborting the pass.
pub trait GeometryOps {
    fn contains(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
    ) -> Result<bool, GeometryOpError>;

    fn overlaps(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
    ) -> Result<bool, GeometryOpError>;

    fn intersection(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
    ) -> Result<MultiPolygon<f64>, GeometryOpError>;

    fn area(&self, geom: &MultiPolygon<f64>) -> Result<f64, GeometryOpError>;

    /// Classify `block` against `zone`.
    fn relation(
        &self,
        zone: &MultiPolygon<f64>,
        block: &MultiPolygon<f64>,
    ) -> Result<SpatialRelation, GeometryOpError> {
        if self.contains(zone, block)? {
            return Ok(SpatialRelation::Contains);
        }
        if self.overlaps(zone, block)? {
            return Ok(SpatialRelation::Overlaps);
        }
        Ok(SpatialRelation::Disjoint)
    }

    /// Fraction of `block`'s area enclosed by `zone`.
    fn overlap_fraction(
        &self,
        zone: &MultiPolygon<f64>,
        block: &MultiPolygon<f64>,
    ) -> Result<f64, GeometryOpError> {
        let block_area = self.area(block)?;
        if block_area <= 0.0 {
            return Err(GeometryOpError::ZeroArea);
        }
        let shared = self.area(&self.intersection(zone, block)?)?;
        let fraction = shared / block_area;
        if !fraction.is_finite() {
            return Err(GeometryOpError::NonFinite(fraction));
        }
        Ok(fraction)
    }
}

/// Geometry backend over planar `geo` primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarOps;

impl GeometryOps for PlanarOps {
    fn contains(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
    ) -> Result<bool, GeometryOpError> {
        Ok(a.relate(b).is_contains())
    }

    fn overlaps(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
    ) -> Result<bool, GeometryOpError> {
        let im = a.relate(b);
        // Area overlap (including containment) = intersects but not merely touching.
        Ok(im.is_intersects() && !im.is_touches())
    }

    fn intersection(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
    ) -> Result<MultiPolygon<f64>, GeometryOpError> {
        Ok(a.intersection(b))
    }

    fn area(&self, geom: &MultiPolygon<f64>) -> Result<f64, GeometryOpError> {
        let area = geom.unsigned_area();
        if !area.is_finite() {
            return Err(GeometryOpError::NonFinite(area));
        }
        Ok(area)
    }

    /// One relate() call gives the full DE-9IM, so classification avoids
    /// computing the matrix twice.
    fn relation(
        &self,
        zone: &MultiPolygon<f64>,
        block: &MultiPolygon<f64>,
    ) -> Result<SpatialRelation, GeometryOpError> {
        let im = zone.relate(block);
        if im.is_contains() {
            Ok(SpatialRelation::Contains)
        } else if im.is_intersects() && !im.is_touches() {
            Ok(SpatialRelation::Overlaps)
        } else {
            Ok(SpatialRelation::Disjoint)
        }
    }
}
