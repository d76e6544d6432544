use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Missing element: {0}")]
    MissingElement(&'static str),
    #[error("Browser API error: {0}")]
    Js(String),
    #[error("Viewer plugin error: {0}")]
    Plugin(String),
    #[error("Invalid site config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(describe_js(&value))
    }
}

impl From<serde_wasm_bindgen::Error> for SiteError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        SiteError::Js(err.to_string())
    }
}

/// Best-effort text for a thrown JS value: the message of an `Error`,
/// the string itself, or the debug form.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    web_sys::js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
