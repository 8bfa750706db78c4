//! Browser share rejection wrapper.

use thiserror::Error;
use wasm_bindgen::JsValue;
use webshare_host::{ABORT_ERROR_NAME, NOT_ALLOWED_ERROR_NAME};

#[derive(Debug, Clone, Error)]
#[error("{name}: {message}")]
/// Rejection raised by `navigator.share`.
///
/// Keeps the original JavaScript value so JS callbacks receive it unmodified.
pub struct JsShareError {
    name: String,
    message: String,
    raw: Option<JsValue>,
}

impl JsShareError {
    /// Creates a rejection that did not originate from a JavaScript value.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            raw: None,
        }
    }

    /// Wraps a rejection value, reading its `name` and `message` when it is an error object.
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(value: JsValue) -> Self {
        let name = js_string_property(&value, "name").unwrap_or_else(|| "Error".to_string());
        let message = js_error_to_string(&value);
        Self {
            name,
            message,
            raw: Some(value),
        }
    }

    /// DOM error name (`AbortError`, `NotAllowedError`, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Original rejection value, if the error came from JavaScript.
    pub fn raw(&self) -> Option<&JsValue> {
        self.raw.as_ref()
    }

    /// Returns whether the user dismissed the share sheet.
    pub fn is_cancellation(&self) -> bool {
        self.name == ABORT_ERROR_NAME
    }

    /// Returns whether host policy denied the share.
    pub fn is_permission_denied(&self) -> bool {
        self.name == NOT_ALLOWED_ERROR_NAME
    }

    /// Value handed to JavaScript callbacks: the original rejection, or a fresh `Error`.
    #[cfg(target_arch = "wasm32")]
    pub fn to_js_value(&self) -> JsValue {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }
        let error = js_sys::Error::new(&self.message);
        error.set_name(&self.name);
        error.into()
    }
}

#[cfg(target_arch = "wasm32")]
fn js_string_property(value: &JsValue, key: &str) -> Option<String> {
    if !value.is_object() {
        return None;
    }
    js_sys::Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|property| property.as_string())
}

/// Renders a thrown JavaScript value as text.
#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error_to_string(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(message) = js_string_property(value, "message") {
        return message;
    }
    format!("{value:?}")
}
