use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}

/// Plain JS objects rather than `Map`s, so results read like parsed GeoJSON.
pub fn to_js(v: &serde_json::Value) -> Result<JsValue, serde_wasm_bindgen::Error> {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

pub fn from_js(v: JsValue) -> Result<serde_json::Value, serde_wasm_bindgen::Error> {
    serde_wasm_bindgen::from_value(v)
}
