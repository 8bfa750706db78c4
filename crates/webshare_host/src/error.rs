//! Error types surfaced by the controller and its host collaborators.

use thiserror::Error;

/// Message reported when the capability check rejects a payload.
pub const NOT_SHAREABLE_MESSAGE: &str = "The specified data is not shareable on this browser.";
/// Host error name for a dismissed share sheet.
pub const ABORT_ERROR_NAME: &str = "AbortError";
/// Host error name for a permission-policy denial.
pub const NOT_ALLOWED_ERROR_NAME: &str = "NotAllowedError";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure handed to the `on_error` callback for one activation.
///
/// `E` is the host's own rejection type, passed through without reclassification.
pub enum ShareError<E> {
    /// The host's capability check refused the payload; share was not attempted.
    #[error("The specified data is not shareable on this browser.")]
    NotShareable,
    /// The native share invocation rejected.
    #[error("native share failed: {0}")]
    Rejected(E),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{name}: {message}")]
/// Host-neutral rejection carrying the DOM-style error name and message.
pub struct HostRejection {
    /// Error name as reported by the host (for example `AbortError`).
    pub name: String,
    /// Human-readable message.
    pub message: String,
}

impl HostRejection {
    /// Creates a rejection from a name and message.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Rejection raised when the user dismisses the share sheet.
    pub fn cancelled() -> Self {
        Self::new(ABORT_ERROR_NAME, "Share canceled")
    }

    /// Rejection raised when host policy denies sharing.
    pub fn permission_denied() -> Self {
        Self::new(NOT_ALLOWED_ERROR_NAME, "Permission denied")
    }

    /// Returns whether the host reported a user cancellation.
    pub fn is_cancellation(&self) -> bool {
        self.name == ABORT_ERROR_NAME
    }

    /// Returns whether the host reported a permission denial.
    pub fn is_permission_denied(&self) -> bool {
        self.name == NOT_ALLOWED_ERROR_NAME
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures that prevent initialization from inspecting the document at all.
pub enum InitError {
    /// A required host object is missing (for example no `window` outside a browser).
    #[error("{0} unavailable")]
    HostUnavailable(&'static str),
    /// The document rejected the trigger selector.
    #[error("trigger query `{selector}` failed: {reason}")]
    Query {
        /// Selector passed to the document.
        selector: String,
        /// Host-provided failure detail.
        reason: String,
    },
}
