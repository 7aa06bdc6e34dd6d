use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile::{PolygonRing, Shape};

/// Convert a shapefile shape to a `geo::MultiPolygon`, if it is a plain
/// polygon shape. Measured/3D polygon variants and non-polygon shapes
/// yield `None` and are skipped by the loaders.
pub fn shape_to_multipolygon(shape: &Shape) -> Option<MultiPolygon<f64>> {
    match shape {
        Shape::Polygon(polygon) => Some(polygon_to_multipolygon(polygon)),
        _ => None,
    }
}

/// Regroup a shapefile polygon's flat ring list into geo polygons.
/// Shapefiles store rings as `[outer, hole, hole, ..., outer, ...]`; each
/// outer ring opens a new polygon and collects the holes that follow it.
fn polygon_to_multipolygon(polygon: &shapefile::Polygon) -> MultiPolygon<f64> {
    fn ring_to_linestring(points: &[shapefile::Point]) -> LineString<f64> {
        let mut coords: Vec<Coord<f64>> =
            points.iter().map(|pt| Coord { x: pt.x, y: pt.y }).collect();
        // geo expects closed rings
        if coords.first() != coords.last() {
            if let Some(&first) = coords.first() {
                coords.push(first);
            }
        }
        LineString(coords)
    }

    let mut polygons: Vec<Polygon<f64>> = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes: Vec<LineString<f64>> = Vec::new();

    for ring in polygon.rings() {
        match ring {
            PolygonRing::Outer(points) => {
                if let Some(done) = exterior.take() {
                    polygons.push(Polygon::new(done, std::mem::take(&mut holes)));
                }
                exterior = Some(ring_to_linestring(points));
            }
            PolygonRing::Inner(points) => holes.push(ring_to_linestring(points)),
        }
    }
    if let Some(done) = exterior {
        polygons.push(Polygon::new(done, holes));
    }

    MultiPolygon(polygons)
}
