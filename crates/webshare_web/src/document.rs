//! DOM-backed document and trigger adapters.

use leptos::logging;
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use webshare_host::{
    ActivationEvent, ActivationHandler, DocumentDefaults, InitError, ShareCallbacks,
    ShareDocument, ShareTriggerConfig, ShareTriggerController, TriggerData, TriggerElement,
    HIDDEN_ATTRIBUTE, SHARE_TEXT_ATTRIBUTE, SHARE_TITLE_ATTRIBUTE, SHARE_URL_ATTRIBUTE,
};

use crate::{capability::NavigatorShareCapability, error::js_error_to_string, JsShareError};

/// Controller wired to the live page.
pub type WebShareController = ShareTriggerController<WebShareDocument, NavigatorShareCapability>;

#[derive(Debug, Clone)]
/// The page's `window` and `document`.
pub struct WebShareDocument {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebShareDocument {
    /// Captures the current window and document.
    ///
    /// # Errors
    ///
    /// Returns an error outside a browsing context.
    pub fn from_window() -> Result<Self, InitError> {
        let window = web_sys::window().ok_or(InitError::HostUnavailable("window"))?;
        let document = window
            .document()
            .ok_or(InitError::HostUnavailable("document"))?;
        Ok(Self { window, document })
    }
}

impl ShareDocument for WebShareDocument {
    type Trigger = WebTrigger;

    fn query_triggers(&self, selector: &str) -> Result<Vec<WebTrigger>, String> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|err| js_error_to_string(&err))?;
        Ok((0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebTrigger)
            .collect())
    }

    fn defaults(&self) -> DocumentDefaults {
        let location = self.window.location().href().unwrap_or_else(|err| {
            logging::warn!(
                "[webshare] failed to read location: {}",
                js_error_to_string(&err)
            );
            String::new()
        });
        DocumentDefaults {
            location,
            title: Some(self.document.title()),
        }
    }
}

#[derive(Debug, Clone)]
/// A matched DOM element.
pub struct WebTrigger(web_sys::Element);

impl WebTrigger {
    /// Underlying element, as handed to JavaScript callbacks.
    pub fn element(&self) -> &web_sys::Element {
        &self.0
    }
}

impl TriggerElement for WebTrigger {
    fn trigger_data(&self) -> TriggerData {
        TriggerData {
            url: self.0.get_attribute(SHARE_URL_ATTRIBUTE),
            title: self.0.get_attribute(SHARE_TITLE_ATTRIBUTE),
            text: self.0.get_attribute(SHARE_TEXT_ATTRIBUTE),
        }
    }

    fn set_hidden(&self, value: &str) {
        if let Err(err) = self.0.set_attribute(HIDDEN_ATTRIBUTE, value) {
            logging::warn!("[webshare] failed to hide trigger: {}", js_error_to_string(&err));
        }
    }

    fn bind_activation(&self, handler: ActivationHandler) -> Result<(), String> {
        let on_click =
            Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event: web_sys::Event| {
                let pending = handler(&DomActivation(event));
                spawn_local(async move {
                    pending.await;
                });
            }));
        self.0
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(|err| js_error_to_string(&err))?;
        // Listeners live for the rest of the page load.
        on_click.forget();
        Ok(())
    }
}

struct DomActivation(web_sys::Event);

impl ActivationEvent for DomActivation {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// Mounts a controller on the live page with the navigator share capability.
///
/// # Errors
///
/// Returns an error outside a browsing context or when the selector is invalid.
pub fn mount_web_share(
    config: ShareTriggerConfig,
    callbacks: ShareCallbacks<WebTrigger, JsShareError>,
) -> Result<WebShareController, InitError> {
    let document = WebShareDocument::from_window()?;
    ShareTriggerController::mount(document, NavigatorShareCapability, config, callbacks)
}
