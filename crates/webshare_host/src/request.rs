//! Share payload model and the pure mapping from trigger data to a request.

use serde::{Deserialize, Serialize};

/// Element attribute carrying the URL override.
pub const SHARE_URL_ATTRIBUTE: &str = "data-webshare-url";
/// Element attribute carrying the title override.
pub const SHARE_TITLE_ATTRIBUTE: &str = "data-webshare-title";
/// Element attribute carrying the text override.
pub const SHARE_TEXT_ATTRIBUTE: &str = "data-webshare-text";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Payload handed to the native share capability for one activation.
pub struct ShareRequest {
    /// URL being shared.
    pub url: String,
    /// Title of the shared content.
    pub title: String,
    /// Free text accompanying the URL.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Per-element overrides read from a trigger. `None` means the attribute is absent.
pub struct TriggerData {
    /// Value of [`SHARE_URL_ATTRIBUTE`].
    pub url: Option<String>,
    /// Value of [`SHARE_TITLE_ATTRIBUTE`].
    pub title: Option<String>,
    /// Value of [`SHARE_TEXT_ATTRIBUTE`].
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Document-level fallbacks sampled at activation time.
pub struct DocumentDefaults {
    /// Current location URL.
    pub location: String,
    /// Document title, if the document has one.
    pub title: Option<String>,
}

/// Builds the request for one activation.
///
/// Overrides win field by field; an empty override counts as absent. `url` falls back to the
/// document location, `title` to the document title and then `""`, `text` to `""`.
pub fn resolve_share_request(data: &TriggerData, defaults: &DocumentDefaults) -> ShareRequest {
    ShareRequest {
        url: non_empty(&data.url)
            .unwrap_or(defaults.location.as_str())
            .to_string(),
        title: non_empty(&data.title)
            .or_else(|| non_empty(&defaults.title))
            .unwrap_or_default()
            .to_string(),
        text: non_empty(&data.text).unwrap_or_default().to_string(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
