//! Host-agnostic contracts for binding native-share triggers in a document.
//!
//! This crate owns the share request model, the injected host collaborators
//! ([`ShareDocument`], [`TriggerElement`], [`ShareCapability`]), the callback record, and the
//! [`ShareTriggerController`] that wires them together. Browser adapters live in `webshare_web`;
//! in-memory doubles for tests and headless integrators live in [`memory`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod callbacks;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod memory;
pub mod request;

pub use callbacks::{ErrorCallback, RequestCallback, ShareCallbacks};
pub use config::{
    ShareTriggerConfig, ShareTriggerOptions, DEFAULT_HIDDEN_VALUE, DEFAULT_TRIGGER_SELECTOR,
    HIDDEN_ATTRIBUTE,
};
pub use controller::{InitOutcome, ShareTriggerController, UnsupportedReason};
pub use error::{
    HostRejection, InitError, ShareError, ABORT_ERROR_NAME, NOT_ALLOWED_ERROR_NAME,
    NOT_SHAREABLE_MESSAGE,
};
pub use host::{
    ActivationEvent, ActivationHandler, ActivationOutcome, ShareCapability, ShareDocument, ShareFuture,
    TriggerElement,
};
pub use memory::{
    MemoryActivation, MemoryShareBehavior, MemoryShareCapability, MemoryShareDocument,
    MemoryTrigger,
};
pub use request::{
    resolve_share_request, DocumentDefaults, ShareRequest, TriggerData, SHARE_TEXT_ATTRIBUTE,
    SHARE_TITLE_ATTRIBUTE, SHARE_URL_ATTRIBUTE,
};
