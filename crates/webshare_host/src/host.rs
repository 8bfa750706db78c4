//! Host collaborator contracts injected into [`crate::ShareTriggerController`].

use std::{fmt, future::Future, pin::Pin, rc::Rc};

use crate::request::{DocumentDefaults, ShareRequest, TriggerData};

/// Object-safe boxed future used by share invocations and activation handlers.
pub type ShareFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Handler bound to a trigger. Runs the synchronous part of an activation immediately and
/// returns the remainder, which settles once the host reports the share outcome.
pub type ActivationHandler =
    Rc<dyn Fn(&dyn ActivationEvent) -> ShareFuture<'static, ActivationOutcome>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Terminal state of one activation.
pub enum ActivationOutcome {
    /// The host reported a completed share.
    Shared,
    /// The capability check refused the payload.
    NotShareable,
    /// The native invocation rejected.
    Failed,
}

/// User activation delivered to a trigger.
pub trait ActivationEvent {
    /// Suppresses the element's default behavior (navigation, form submission).
    fn prevent_default(&self);
}

/// A document element designated to start a share.
pub trait TriggerElement: Clone + fmt::Debug + 'static {
    /// Reads the per-element overrides.
    fn trigger_data(&self) -> TriggerData;

    /// Marks the element hidden by writing `value` to its `hidden` attribute.
    fn set_hidden(&self, value: &str);

    /// Attaches `handler` to the element's activation event for the rest of the page load.
    ///
    /// # Errors
    ///
    /// Returns the host's failure detail when the listener cannot be attached.
    fn bind_activation(&self, handler: ActivationHandler) -> Result<(), String>;
}

/// Document query surface.
pub trait ShareDocument: 'static {
    /// Element type returned by [`ShareDocument::query_triggers`].
    type Trigger: TriggerElement;

    /// Returns every element matching `selector`, possibly none.
    ///
    /// # Errors
    ///
    /// Returns the host's failure detail when `selector` is rejected.
    fn query_triggers(&self, selector: &str) -> Result<Vec<Self::Trigger>, String>;

    /// Samples the current location and title.
    fn defaults(&self) -> DocumentDefaults;
}

/// Native sharing surface exposed by the host.
pub trait ShareCapability: 'static {
    /// Host rejection type passed through to `on_error`.
    type Error: fmt::Debug + fmt::Display + 'static;

    /// Returns whether the page runs in a secure context.
    fn is_secure_context(&self) -> bool;

    /// Returns whether the host exposes a share invocation.
    fn is_share_supported(&self) -> bool;

    /// Runs the host's capability check, or returns `None` when the host has none.
    fn can_share(&self, request: &ShareRequest) -> Option<bool>;

    /// Starts the native share.
    ///
    /// Implementations must start the host call before returning so it runs inside the user
    /// activation; the returned future only waits for the outcome.
    fn share(&self, request: &ShareRequest) -> ShareFuture<'static, Result<(), Self::Error>>;
}
