//! Geometry capabilities the adjacency algorithm depends on.
//!
//! The detector only talks to [`GeometryEngine`], so its control flow does
//! not change with the backing library. [`GeoEngine`] implements it on top of
//! the `geo` crate.

use geo::{Area, BooleanOps, Buffer, LineString, MultiPolygon, Polygon, Relate};

use crate::geometry::bbox::BBox;
use crate::model::RegionGeometry;

pub trait GeometryEngine {
    fn bounding_box(&self, geometry: &RegionGeometry) -> Option<BBox>;

    /// Buffer a closed exterior ring outward by `margin` and return the
    /// exterior of the result, or `None` when nothing is left.
    fn buffer_exterior(&self, exterior: &LineString<f64>, margin: f64) -> Option<LineString<f64>>;

    /// Merge polygons into the polygons covering their combined area.
    fn union(&self, parts: &[Polygon<f64>]) -> MultiPolygon<f64>;

    /// True when the geometries share interior area. Touching boundaries
    /// alone do not count.
    fn overlaps(&self, a: &RegionGeometry, b: &RegionGeometry) -> bool;
}

/// Engine backed by `geo` boolean ops, buffering and DE-9IM relate.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeoEngine;

impl GeometryEngine for GeoEngine {
    fn bounding_box(&self, geometry: &RegionGeometry) -> Option<BBox> {
        geometry.bbox()
    }

    fn buffer_exterior(&self, exterior: &LineString<f64>, margin: f64) -> Option<LineString<f64>> {
        let shell = Polygon::new(exterior.clone(), vec![]);
        // An outward buffer of one ring is connected; keep the largest piece
        // in case of slivers.
        shell
            .buffer(margin)
            .0
            .into_iter()
            .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
            .map(|p| p.into_inner().0)
            .filter(|ring| !ring.0.is_empty())
    }

    fn union(&self, parts: &[Polygon<f64>]) -> MultiPolygon<f64> {
        let mut iter = parts.iter();
        let Some(first) = iter.next() else {
            return MultiPolygon::new(vec![]);
        };
        let mut acc = MultiPolygon::new(vec![first.clone()]);
        for p in iter {
            acc = acc.union(&MultiPolygon::new(vec![p.clone()]));
        }
        acc
    }

    fn overlaps(&self, a: &RegionGeometry, b: &RegionGeometry) -> bool {
        use RegionGeometry::{MultiPolygon as M, Polygon as P};
        let im = match (a, b) {
            (P(x), P(y)) => x.relate(y),
            (P(x), M(y)) => x.relate(y),
            (M(x), P(y)) => x.relate(y),
            (M(x), M(y)) => x.relate(y),
        };
        im.is_intersects() && !im.is_touches()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, BoundingRect};

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> RegionGeometry {
        polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)].into()
    }

    #[test]
    fn touching_squares_do_not_overlap() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(1.0, 0.0, 2.0, 1.0);
        assert!(!GeoEngine.overlaps(&a, &b));
    }

    #[test]
    fn overlapping_and_contained_squares_overlap() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        assert!(GeoEngine.overlaps(&a, &square(0.5, 0.5, 1.5, 1.5)));
        assert!(GeoEngine.overlaps(&a, &square(0.25, 0.25, 0.75, 0.75)));
    }

    #[test]
    fn buffer_grows_bounding_box() {
        let ring = match square(0.0, 0.0, 1.0, 1.0) {
            RegionGeometry::Polygon(p) => p.exterior().clone(),
            RegionGeometry::MultiPolygon(_) => unreachable!(),
        };
        let out = GeoEngine.buffer_exterior(&ring, 0.1).unwrap();
        let bb = BBox::from(out.bounding_rect().unwrap());
        assert!((bb.min_x + 0.1).abs() < 1e-6);
        assert!((bb.max_x - 1.1).abs() < 1e-6);
        assert!(out.0.len() > ring.0.len());
    }

    #[test]
    fn union_of_overlapping_parts_is_one_polygon() {
        let parts = match (square(0.0, 0.0, 1.0, 1.0), square(0.5, 0.0, 1.5, 1.0)) {
            (RegionGeometry::Polygon(a), RegionGeometry::Polygon(b)) => vec![a, b],
            _ => unreachable!(),
        };
        assert_eq!(GeoEngine.union(&parts).0.len(), 1);
        assert!(GeoEngine.union(&[]).0.is_empty());
    }
}
