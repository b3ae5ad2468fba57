//! Re-merge bloated parts of a multi-part region.
//!
//! Parts buffered independently can start overlapping each other. Testing a
//! multi-polygon with overlapping members is ill-defined, so the parts are
//! unioned first.

use geo::{MultiPolygon, Polygon};

use crate::engine::GeometryEngine;
use crate::error::RegionError;
use crate::model::{Region, RegionGeometry};

/// Union `parts` into one geometry: a polygon when they merge completely,
/// otherwise the multi-polygon of what remains disjoint.
pub fn unify_parts<E: GeometryEngine + ?Sized>(
    engine: &E,
    parts: Vec<Polygon<f64>>,
) -> Result<RegionGeometry, RegionError> {
    let count = parts.len();
    let mut merged = engine.union(&parts);
    match merged.0.len() {
        0 => Err(RegionError::GeometryUnionFailure { parts: count }),
        1 => Ok(RegionGeometry::Polygon(merged.0.remove(0))),
        _ => Ok(RegionGeometry::MultiPolygon(MultiPolygon::new(merged.0))),
    }
}

/// Union a region's parts; label and properties are copied.
pub fn unify_multi_part<E: GeometryEngine + ?Sized>(
    engine: &E,
    region: &Region,
) -> Result<Region, RegionError> {
    let geometry = match &region.geometry {
        RegionGeometry::Polygon(p) => RegionGeometry::Polygon(p.clone()),
        RegionGeometry::MultiPolygon(mp) => unify_parts(engine, mp.0.clone())?,
    };
    Ok(Region {
        index: region.index,
        label: region.label.clone(),
        properties: region.properties.clone(),
        geometry,
        adjacents: region.adjacents.clone(),
    })
}
