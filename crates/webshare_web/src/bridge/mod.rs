//! Navigator share interop.
//!
//! Routes calls to the wasm implementation or to a native fallback that reports sharing as
//! unsupported, keeping one API for [`crate::capability`].

use webshare_host::{ShareFuture, ShareRequest};

use crate::error::JsShareError;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub fn is_secure_context() -> bool {
    imp::is_secure_context()
}

pub fn share_supported() -> bool {
    imp::share_supported()
}

pub fn can_share(request: &ShareRequest) -> Option<bool> {
    imp::can_share(request)
}

pub fn share(request: &ShareRequest) -> ShareFuture<'static, Result<(), JsShareError>> {
    imp::share(request)
}
