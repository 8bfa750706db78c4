use super::*;

fn unsupported() -> JsShareError {
    JsShareError::new(
        "NotSupportedError",
        "Web Share API is only available when compiled for wasm32",
    )
}

pub fn is_secure_context() -> bool {
    false
}

pub fn share_supported() -> bool {
    false
}

pub fn can_share(_request: &ShareRequest) -> Option<bool> {
    None
}

pub fn share(_request: &ShareRequest) -> ShareFuture<'static, Result<(), JsShareError>> {
    Box::pin(async { Err(unsupported()) })
}
