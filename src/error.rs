use hoodgraph::{AdjacencyError, IngestError};
use wasm_bindgen::prelude::*;

use crate::interop::{new_obj, set_kv};

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn json_parse(e: impl std::fmt::Display) -> JsValue {
    err("json_parse", e.to_string(), None)
}

#[inline]
pub fn ingest(e: &IngestError) -> JsValue {
    err(e.code(), e.to_string(), None)
}

/// Region failures carry the offending region's index and label.
pub fn adjacency(e: &AdjacencyError) -> JsValue {
    let data = match e {
        AdjacencyError::Region { index, label, .. } => {
            let d = new_obj();
            set_kv(&d, "index", &JsValue::from_f64(*index as f64));
            set_kv(&d, "label", &JsValue::from_str(label));
            Some(d.into())
        }
        AdjacencyError::Config(_) => None,
    };
    err(e.code(), e.to_string(), data)
}

#[inline]
pub fn invalid_margin(got: f64) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str("margin"));
    set_kv(&d, "got", &JsValue::from_f64(got));
    err("invalid_config", "margin must be finite and non-negative", Some(d.into()))
}
