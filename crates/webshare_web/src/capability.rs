//! Navigator-backed share capability.

use webshare_host::{ShareCapability, ShareFuture, ShareRequest};

use crate::{bridge, error::JsShareError};

#[derive(Debug, Clone, Copy, Default)]
/// Share capability backed by `window.isSecureContext`, `navigator.canShare`, and
/// `navigator.share`.
pub struct NavigatorShareCapability;

impl ShareCapability for NavigatorShareCapability {
    type Error = JsShareError;

    fn is_secure_context(&self) -> bool {
        bridge::is_secure_context()
    }

    fn is_share_supported(&self) -> bool {
        bridge::share_supported()
    }

    fn can_share(&self, request: &ShareRequest) -> Option<bool> {
        bridge::can_share(request)
    }

    fn share(&self, request: &ShareRequest) -> ShareFuture<'static, Result<(), JsShareError>> {
        bridge::share(request)
    }
}
