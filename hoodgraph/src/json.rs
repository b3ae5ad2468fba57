//! GeoJSON import/export for region collections.
//!
//! Only Polygon and MultiPolygon features are accepted. On export each
//! feature's properties carry `label`, `index` and `adjacents`.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::IngestError;
use crate::geometry::limits;
use crate::model::{Region, RegionCollection, RegionGeometry};

#[derive(Deserialize)]
struct GeometryDe {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

#[derive(Deserialize)]
struct FeatureDe {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    geometry: Option<GeometryDe>,
}

#[derive(Deserialize)]
struct CollectionDe {
    features: Vec<FeatureDe>,
}

#[derive(Serialize)]
struct GeometrySer<C> {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: C,
}

type RingSer = Vec<[f64; 2]>;

struct Budget {
    points: usize,
}

impl Budget {
    fn spend(&mut self, n: usize) -> Result<(), IngestError> {
        self.points += n;
        if self.points > limits::MAX_POINTS_TOTAL {
            return Err(IngestError::CapsExceeded(format!(
                "points_total>{}",
                limits::MAX_POINTS_TOTAL
            )));
        }
        Ok(())
    }
}

fn ring_from_positions(
    feature: usize,
    positions: Vec<Vec<f64>>,
    budget: &mut Budget,
) -> Result<LineString<f64>, IngestError> {
    if positions.len() > limits::MAX_RING_POINTS {
        return Err(IngestError::CapsExceeded(format!(
            "ring_points>{}",
            limits::MAX_RING_POINTS
        )));
    }
    budget.spend(positions.len())?;
    let mut coords = Vec::with_capacity(positions.len());
    for p in positions {
        // Extra ordinates (altitude) are ignored.
        let (x, y) = match p.as_slice() {
            [x, y, ..] => (*x, *y),
            _ => return Err(IngestError::MalformedPosition { feature }),
        };
        if !limits::in_coord_bounds(x) || !limits::in_coord_bounds(y) {
            return Err(IngestError::OutOfBounds { feature });
        }
        coords.push(Coord { x, y });
    }
    Ok(LineString::from(coords))
}

fn polygon_from_rings(
    feature: usize,
    rings: Vec<Vec<Vec<f64>>>,
    budget: &mut Budget,
) -> Result<Polygon<f64>, IngestError> {
    let mut rings = rings.into_iter();
    let exterior = rings.next().ok_or(IngestError::MalformedPosition { feature })?;
    let exterior = ring_from_positions(feature, exterior, budget)?;
    let interiors = rings
        .map(|r| ring_from_positions(feature, r, budget))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn geometry_from_de(
    feature: usize,
    g: GeometryDe,
    budget: &mut Budget,
) -> Result<RegionGeometry, IngestError> {
    let malformed = |_| IngestError::MalformedPosition { feature };
    match g.kind.as_str() {
        "Polygon" => {
            let rings: Vec<Vec<Vec<f64>>> =
                serde_json::from_value(g.coordinates).map_err(malformed)?;
            Ok(RegionGeometry::Polygon(polygon_from_rings(feature, rings, budget)?))
        }
        "MultiPolygon" => {
            let parts: Vec<Vec<Vec<Vec<f64>>>> =
                serde_json::from_value(g.coordinates).map_err(malformed)?;
            if parts.len() > limits::MAX_PARTS_PER_REGION {
                return Err(IngestError::CapsExceeded(format!(
                    "parts_per_region>{}",
                    limits::MAX_PARTS_PER_REGION
                )));
            }
            let polys = parts
                .into_iter()
                .map(|rings| polygon_from_rings(feature, rings, budget))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RegionGeometry::MultiPolygon(MultiPolygon::new(polys)))
        }
        other => Err(IngestError::UnsupportedGeometry { feature, kind: other.to_string() }),
    }
}

fn region_from_de(feature: usize, f: FeatureDe, budget: &mut Budget) -> Result<Region, IngestError> {
    let geometry = f.geometry.ok_or(IngestError::UnsupportedGeometry {
        feature,
        kind: "null".to_string(),
    })?;
    let geometry = geometry_from_de(feature, geometry, budget)?;
    let properties = f.properties.unwrap_or_default();
    let label = properties
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(Region::new(label, geometry).with_properties(properties))
}

/// Parse one GeoJSON Feature.
pub fn region_from_feature(v: Value) -> Result<Region, IngestError> {
    let f: FeatureDe = serde_json::from_value(v).map_err(|e| IngestError::Parse(e.to_string()))?;
    region_from_de(0, f, &mut Budget { points: 0 })
}

/// Parse a GeoJSON FeatureCollection; feature order becomes region order.
pub fn from_geojson_value(v: Value) -> Result<RegionCollection, IngestError> {
    let doc: CollectionDe =
        serde_json::from_value(v).map_err(|e| IngestError::Parse(e.to_string()))?;
    if doc.features.len() > limits::MAX_REGIONS {
        return Err(IngestError::CapsExceeded(format!("regions>{}", limits::MAX_REGIONS)));
    }
    let mut budget = Budget { points: 0 };
    doc.features
        .into_iter()
        .enumerate()
        .map(|(i, f)| region_from_de(i, f, &mut budget))
        .collect()
}

pub fn from_geojson_str(s: &str) -> Result<RegionCollection, IngestError> {
    let v: Value = serde_json::from_str(s).map_err(|e| IngestError::Parse(e.to_string()))?;
    from_geojson_value(v)
}

fn ring_ser(ring: &LineString<f64>) -> RingSer {
    ring.0.iter().map(|c| [c.x, c.y]).collect()
}

fn polygon_ser(p: &Polygon<f64>) -> Vec<RingSer> {
    std::iter::once(p.exterior())
        .chain(p.interiors().iter())
        .map(ring_ser)
        .collect()
}

fn geometry_to_value(g: &RegionGeometry) -> Value {
    let v = match g {
        RegionGeometry::Polygon(p) => serde_json::to_value(GeometrySer {
            kind: "Polygon",
            coordinates: polygon_ser(p),
        }),
        RegionGeometry::MultiPolygon(mp) => serde_json::to_value(GeometrySer {
            kind: "MultiPolygon",
            coordinates: mp.0.iter().map(polygon_ser).collect::<Vec<_>>(),
        }),
    };
    v.unwrap_or(Value::Null)
}

/// One GeoJSON Feature with `label`, `index` and `adjacents` in its properties.
pub fn region_to_feature(r: &Region) -> Value {
    let mut properties = r.properties.clone();
    properties.insert("label".into(), Value::from(r.label.clone()));
    properties.insert("index".into(), Value::from(r.index));
    properties.insert("adjacents".into(), Value::from(r.adjacents.clone()));
    let mut feature = Map::new();
    feature.insert("type".into(), Value::from("Feature"));
    feature.insert("properties".into(), Value::Object(properties));
    feature.insert("geometry".into(), geometry_to_value(&r.geometry));
    Value::Object(feature)
}

pub fn to_geojson_value(c: &RegionCollection) -> Value {
    let mut doc = Map::new();
    doc.insert("type".into(), Value::from("FeatureCollection"));
    doc.insert("features".into(), Value::Array(c.iter().map(region_to_feature).collect()));
    Value::Object(doc)
}
