//! JavaScript entry point.

use js_sys::{Function, Reflect};
use leptos::logging;
use wasm_bindgen::prelude::*;
use webshare_host::{
    ShareCallbacks, ShareError, ShareRequest, ShareTriggerConfig, ShareTriggerOptions,
    NOT_SHAREABLE_MESSAGE,
};

use crate::{
    document::{mount_web_share, WebShareController, WebTrigger},
    error::js_error_to_string,
    JsShareError,
};

/// `new WebShare(selector?, { beforeShare, success, error, selector, hiddenAttributeValue })`.
///
/// Binds every matching trigger on construction. `onSuccess` and `onError` are accepted as
/// aliases for `success` and `error`. A non-blank `selector` argument wins over
/// `options.selector`.
#[wasm_bindgen]
pub struct WebShare {
    _controller: WebShareController,
}

#[wasm_bindgen]
impl WebShare {
    /// Mounts the controller on the current page.
    #[wasm_bindgen(constructor)]
    pub fn new(selector: Option<String>, options: JsValue) -> Result<WebShare, JsValue> {
        console_error_panic_hook::set_once();
        let config =
            ShareTriggerConfig::from_options(selector.as_deref(), &js_options(&options));
        let controller = mount_web_share(config, js_callbacks(&options))
            .map_err(|err| JsValue::from(js_sys::Error::new(&err.to_string())))?;
        Ok(Self {
            _controller: controller,
        })
    }
}

fn js_options(options: &JsValue) -> ShareTriggerOptions {
    if !options.is_object() {
        return ShareTriggerOptions::default();
    }
    serde_wasm_bindgen::from_value(options.clone()).unwrap_or_else(|err| {
        logging::warn!("[webshare] ignoring invalid options: {err}");
        ShareTriggerOptions::default()
    })
}

fn option_function(options: &JsValue, names: &[&str]) -> Option<Function> {
    if !options.is_object() {
        return None;
    }
    names.iter().find_map(|name| {
        Reflect::get(options, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    })
}

fn js_callbacks(options: &JsValue) -> ShareCallbacks<WebTrigger, JsShareError> {
    let mut callbacks = ShareCallbacks::default();

    if let Some(before_share) = option_function(options, &["beforeShare"]) {
        callbacks = callbacks.before_share(move |request, trigger| {
            call_js(&before_share, &request_to_js(request), trigger);
        });
    }
    if let Some(success) = option_function(options, &["success", "onSuccess"]) {
        callbacks = callbacks.on_success(move |request, trigger| {
            call_js(&success, &request_to_js(request), trigger);
        });
    }
    if let Some(error) = option_function(options, &["error", "onError"]) {
        callbacks = callbacks.on_error(move |failure, trigger| {
            call_js(&error, &error_to_js(failure), trigger);
        });
    }

    callbacks
}

fn request_to_js(request: &ShareRequest) -> JsValue {
    serde_wasm_bindgen::to_value(request).unwrap_or(JsValue::UNDEFINED)
}

fn error_to_js(error: &ShareError<JsShareError>) -> JsValue {
    match error {
        ShareError::NotShareable => JsValue::from_str(NOT_SHAREABLE_MESSAGE),
        ShareError::Rejected(rejection) => rejection.to_js_value(),
    }
}

/// Invokes a user callback; exceptions are logged so they never escape the click handler.
fn call_js(callback: &Function, payload: &JsValue, trigger: &WebTrigger) {
    if let Err(err) = callback.call2(&JsValue::NULL, payload, trigger.element().as_ref()) {
        logging::error!("[webshare] callback threw: {}", js_error_to_string(&err));
    }
}
