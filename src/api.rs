use hoodgraph::json::{from_geojson_value, region_from_feature, region_to_feature, to_geojson_value};
use hoodgraph::{
    AdjacencyConfig, AdjacencyDetector, AdjacencyError, GeoEngine, NoProgress, ProgressObserver, RegionProgress,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::error;
use crate::interop::{from_js, to_js};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Options accepted by [`make_indexed_collection`]: the detector settings
/// plus `logProgress`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct IndexOptions {
    log_progress: bool,
    #[serde(flatten)]
    config: AdjacencyConfig,
}

fn console_progress(p: &RegionProgress<'_>) {
    let line = format!(
        "Finished {}/{}: {} -> {:?}",
        p.completed, p.total, p.label, p.adjacents
    );
    web_sys::console::log_1(&JsValue::from_str(&line));
}

fn parse_options(options: JsValue) -> Result<IndexOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(IndexOptions::default());
    }
    let v = from_js(options).map_err(error::json_parse)?;
    serde_json::from_value(v).map_err(error::json_parse)
}

/// Compute adjacency for a GeoJSON FeatureCollection of Polygon and
/// MultiPolygon features. Returns `{ ok, value }` with a new collection whose
/// feature properties carry `index` and `adjacents`; the argument is never
/// modified.
#[wasm_bindgen]
pub fn make_indexed_collection(collection: JsValue, options: JsValue) -> JsValue {
    let options = match parse_options(options) {
        Ok(o) => o,
        Err(e) => return e,
    };
    let detector = match AdjacencyDetector::new(options.config) {
        Ok(d) => d,
        Err(e) => return error::adjacency(&AdjacencyError::from(e)),
    };
    let value = match from_js(collection) {
        Ok(v) => v,
        Err(e) => return error::json_parse(e),
    };
    let mut regions = match from_geojson_value(value) {
        Ok(c) => c,
        Err(e) => return error::ingest(&e),
    };

    let mut log = console_progress;
    let mut quiet = NoProgress;
    let observer: &mut dyn ProgressObserver =
        if options.log_progress { &mut log } else { &mut quiet };
    if let Err(e) = detector.detect_with_progress(&mut regions, observer) {
        return error::adjacency(&e);
    }
    match to_js(&to_geojson_value(&regions)) {
        Ok(v) => error::ok(v),
        Err(e) => error::json_parse(e),
    }
}

/// Bloated, same-complexity copy of one Polygon or MultiPolygon feature.
#[wasm_bindgen]
pub fn bloat_and_simplify(feature: JsValue, margin: f64) -> JsValue {
    if !margin.is_finite() || margin < 0.0 {
        return error::invalid_margin(margin);
    }
    let region = match from_js(feature).map(region_from_feature) {
        Ok(Ok(r)) => r,
        Ok(Err(e)) => return error::ingest(&e),
        Err(e) => return error::json_parse(e),
    };
    match hoodgraph::bloat_and_simplify(&GeoEngine, &region, margin) {
        Ok(bloated) => match to_js(&region_to_feature(&bloated)) {
            Ok(v) => error::ok(v),
            Err(e) => error::json_parse(e),
        },
        Err(e) => error::err(e.code(), e.to_string(), None),
    }
}
