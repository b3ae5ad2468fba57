//! Bloat-and-simplify: a slightly grown, same-complexity stand-in for a
//! region, used only as the subject of an overlap test.
//!
//! Shared borders of two regions rarely coincide exactly in floating point.
//! Growing one side by a small margin turns "misses by epsilon" into a real
//! overlap; the margin trades recall against over-reporting.

use geo::{LineString, Polygon};

use crate::algorithms::unify::unify_parts;
use crate::engine::GeometryEngine;
use crate::error::RegionError;
use crate::geometry::simplify::simplify_to_count;
use crate::geometry::tolerance::MIN_RING_POINTS;
use crate::model::{Region, RegionGeometry};

/// Buffer one polygon's exterior ring and simplify back to its point count.
/// Holes are dropped.
pub fn bloat_polygon<E: GeometryEngine + ?Sized>(
    engine: &E,
    polygon: &Polygon<f64>,
    margin: f64,
) -> Result<Polygon<f64>, RegionError> {
    let exterior = polygon.exterior();
    let count = exterior.0.len();
    if count < MIN_RING_POINTS {
        return Err(RegionError::InsufficientRing { points: count, required: MIN_RING_POINTS });
    }
    let buffered = engine
        .buffer_exterior(exterior, margin)
        .filter(|ring| ring.0.len() >= MIN_RING_POINTS)
        .ok_or(RegionError::DegenerateBuffer)?;
    // Buffering can collapse repeated vertices below the original count.
    let ring = simplify_to_count(&buffered.0, count)?;
    Ok(Polygon::new(LineString::from(ring), vec![]))
}

/// Bloat every part; multi-part results are merged by union.
pub fn bloat_geometry<E: GeometryEngine + ?Sized>(
    engine: &E,
    geometry: &RegionGeometry,
    margin: f64,
) -> Result<RegionGeometry, RegionError> {
    match geometry {
        RegionGeometry::Polygon(p) => Ok(RegionGeometry::Polygon(bloat_polygon(engine, p, margin)?)),
        RegionGeometry::MultiPolygon(mp) => {
            let parts = mp
                .0
                .iter()
                .map(|p| bloat_polygon(engine, p, margin))
                .collect::<Result<Vec<_>, _>>()?;
            unify_parts(engine, parts)
        }
    }
}

/// Bloated copy of `region`. The input is left untouched.
pub fn bloat_and_simplify<E: GeometryEngine + ?Sized>(
    engine: &E,
    region: &Region,
    margin: f64,
) -> Result<Region, RegionError> {
    let geometry = bloat_geometry(engine, &region.geometry, margin)?;
    Ok(Region {
        index: region.index,
        label: region.label.clone(),
        properties: region.properties.clone(),
        geometry,
        adjacents: region.adjacents.clone(),
    })
}
