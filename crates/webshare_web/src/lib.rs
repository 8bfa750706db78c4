//! Browser (`wasm32`) implementations of the [`webshare_host`] collaborator contracts.
//!
//! - [`NavigatorShareCapability`] wraps `navigator.share` / `navigator.canShare`.
//! - `WebShareDocument` and `WebTrigger` wrap DOM queries and click listeners (wasm only).
//! - `WebShare` is the JavaScript-visible entry point (wasm only).
//!
//! Non-wasm builds route through a fallback shim that reports sharing as unsupported, so the
//! crate compiles and tests natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod bridge;
pub mod capability;
#[cfg(target_arch = "wasm32")]
pub mod document;
#[cfg(target_arch = "wasm32")]
pub mod entry;
pub mod error;

pub use capability::NavigatorShareCapability;
#[cfg(target_arch = "wasm32")]
pub use document::{mount_web_share, WebShareController, WebShareDocument, WebTrigger};
#[cfg(target_arch = "wasm32")]
pub use entry::WebShare;
pub use error::JsShareError;
