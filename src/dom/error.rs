//! Errors raised while building or driving the widget in a browser.

use wasm_bindgen::JsValue;

/// Browser-side failures.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("No window object available")]
    NoWindow,

    #[error("No document available")]
    NoDocument,

    #[error("Document has no body")]
    NoBody,

    /// A DOM call threw
    #[error("JavaScript exception: {0}")]
    Js(String),

    /// A created element did not have the expected type
    #[error("Element is not a {0}")]
    Cast(&'static str),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<DomError> for JsValue {
    fn from(error: DomError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}
