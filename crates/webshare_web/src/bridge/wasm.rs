use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::*;

fn navigator_method(name: &str) -> Option<(web_sys::Navigator, Function)> {
    let navigator = web_sys::window()?.navigator();
    let method = Reflect::get(&navigator, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()?;
    Some((navigator, method))
}

fn share_data(request: &ShareRequest) -> Result<JsValue, JsShareError> {
    serde_wasm_bindgen::to_value(request).map_err(|err| JsShareError::from_js(err.into()))
}

pub fn is_secure_context() -> bool {
    web_sys::window().is_some_and(|window| window.is_secure_context())
}

pub fn share_supported() -> bool {
    navigator_method("share").is_some()
}

pub fn can_share(request: &ShareRequest) -> Option<bool> {
    let (navigator, can_share) = navigator_method("canShare")?;
    let shareable = share_data(request)
        .and_then(|data| {
            can_share
                .call1(&navigator, &data)
                .map_err(JsShareError::from_js)
        })
        .is_ok_and(|verdict| verdict.is_truthy());
    Some(shareable)
}

/// Calls `navigator.share` before returning so the call stays inside the user activation.
fn start_share(request: &ShareRequest) -> Result<Promise, JsShareError> {
    let (navigator, share) = navigator_method("share").ok_or_else(|| {
        JsShareError::new("NotSupportedError", "navigator.share is unavailable")
    })?;
    let data = share_data(request)?;
    let returned = share
        .call1(&navigator, &data)
        .map_err(JsShareError::from_js)?;
    Ok(Promise::resolve(&returned))
}

pub fn share(request: &ShareRequest) -> ShareFuture<'static, Result<(), JsShareError>> {
    let started = start_share(request);
    Box::pin(async move {
        let promise = started?;
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(JsShareError::from_js)
    })
}
