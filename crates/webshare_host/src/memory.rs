//! In-memory host doubles for headless integrators and tests.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use futures::channel::oneshot;

use crate::{
    error::HostRejection,
    host::{
        ActivationEvent, ActivationHandler, ActivationOutcome, ShareCapability, ShareDocument,
        ShareFuture, TriggerElement,
    },
    request::{DocumentDefaults, ShareRequest, TriggerData},
};

#[derive(Default)]
struct TriggerState {
    data: RefCell<TriggerData>,
    hidden: RefCell<Option<String>>,
    handlers: RefCell<Vec<ActivationHandler>>,
}

#[derive(Clone, Default)]
/// Trigger element double. Clones share state; equality is identity.
pub struct MemoryTrigger {
    inner: Rc<TriggerState>,
}

impl MemoryTrigger {
    /// Creates a trigger carrying `data`.
    pub fn new(data: TriggerData) -> Self {
        let trigger = Self::default();
        *trigger.inner.data.borrow_mut() = data;
        trigger
    }

    /// Returns the `hidden` attribute value, if set.
    pub fn hidden_value(&self) -> Option<String> {
        self.inner.hidden.borrow().clone()
    }

    /// Returns whether the trigger was hidden.
    pub fn is_hidden(&self) -> bool {
        self.inner.hidden.borrow().is_some()
    }

    /// Returns the number of bound activation handlers.
    pub fn handler_count(&self) -> usize {
        self.inner.handlers.borrow().len()
    }

    /// Simulates a click: runs every bound handler's synchronous part.
    pub fn activate(&self) -> MemoryActivation {
        let event = MemoryEvent::default();
        let handlers = self.inner.handlers.borrow().clone();
        let pending = handlers.iter().map(|handler| handler(&event)).collect();
        MemoryActivation {
            default_prevented: event.default_prevented.get(),
            pending,
        }
    }
}

impl PartialEq for MemoryTrigger {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for MemoryTrigger {}

impl fmt::Debug for MemoryTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTrigger")
            .field("data", &self.inner.data.borrow())
            .field("hidden", &self.inner.hidden.borrow())
            .field("handlers", &self.handler_count())
            .finish()
    }
}

impl TriggerElement for MemoryTrigger {
    fn trigger_data(&self) -> TriggerData {
        self.inner.data.borrow().clone()
    }

    fn set_hidden(&self, value: &str) {
        *self.inner.hidden.borrow_mut() = Some(value.to_string());
    }

    fn bind_activation(&self, handler: ActivationHandler) -> Result<(), String> {
        self.inner.handlers.borrow_mut().push(handler);
        Ok(())
    }
}

#[derive(Default)]
struct MemoryEvent {
    default_prevented: Cell<bool>,
}

impl ActivationEvent for MemoryEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }
}

/// Result of [`MemoryTrigger::activate`].
pub struct MemoryActivation {
    /// Whether a handler suppressed the default behavior.
    pub default_prevented: bool,
    pending: Vec<ShareFuture<'static, ActivationOutcome>>,
}

impl MemoryActivation {
    /// Returns the number of handlers that ran.
    pub fn handler_runs(&self) -> usize {
        self.pending.len()
    }

    /// Awaits every handler's outcome in binding order.
    pub async fn finish(self) -> Vec<ActivationOutcome> {
        let mut outcomes = Vec::with_capacity(self.pending.len());
        for pending in self.pending {
            outcomes.push(pending.await);
        }
        outcomes
    }
}

impl fmt::Debug for MemoryActivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryActivation")
            .field("default_prevented", &self.default_prevented)
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[derive(Debug, Default)]
struct DocumentState {
    defaults: DocumentDefaults,
    triggers: Vec<(String, MemoryTrigger)>,
    query_error: Option<String>,
    queries: usize,
}

#[derive(Debug, Clone, Default)]
/// Document double. Triggers are registered under the exact selector that matches them.
pub struct MemoryShareDocument {
    inner: Rc<RefCell<DocumentState>>,
}

impl MemoryShareDocument {
    /// Creates a document with the given location and title.
    pub fn new(location: impl Into<String>, title: Option<&str>) -> Self {
        let document = Self::default();
        document.inner.borrow_mut().defaults = DocumentDefaults {
            location: location.into(),
            title: title.map(str::to_string),
        };
        document
    }

    /// Registers `trigger` as matching `selector` and returns it.
    pub fn insert(&self, selector: impl Into<String>, trigger: MemoryTrigger) -> MemoryTrigger {
        self.inner
            .borrow_mut()
            .triggers
            .push((selector.into(), trigger.clone()));
        trigger
    }

    /// Changes the current location.
    pub fn set_location(&self, location: impl Into<String>) {
        self.inner.borrow_mut().defaults.location = location.into();
    }

    /// Makes every following query fail with `reason`.
    pub fn fail_queries(&self, reason: impl Into<String>) {
        self.inner.borrow_mut().query_error = Some(reason.into());
    }

    /// Returns the number of queries issued.
    pub fn query_count(&self) -> usize {
        self.inner.borrow().queries
    }
}

impl ShareDocument for MemoryShareDocument {
    type Trigger = MemoryTrigger;

    fn query_triggers(&self, selector: &str) -> Result<Vec<MemoryTrigger>, String> {
        let mut state = self.inner.borrow_mut();
        state.queries += 1;
        if let Some(reason) = &state.query_error {
            return Err(reason.clone());
        }
        Ok(state
            .triggers
            .iter()
            .filter(|(matched_by, _)| matched_by == selector)
            .map(|(_, trigger)| trigger.clone())
            .collect())
    }

    fn defaults(&self) -> DocumentDefaults {
        self.inner.borrow().defaults.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// How [`MemoryShareCapability`] settles share invocations.
pub enum MemoryShareBehavior {
    /// Resolve immediately.
    #[default]
    Resolve,
    /// Reject immediately with the given rejection.
    Reject(HostRejection),
    /// Stay pending until [`MemoryShareCapability::settle`] is called.
    Defer,
}

type CanShareFn = Rc<dyn Fn(&ShareRequest) -> bool>;

struct CapabilityState {
    secure_context: bool,
    share_supported: bool,
    can_share: Option<CanShareFn>,
    behavior: MemoryShareBehavior,
    invocations: Vec<ShareRequest>,
    can_share_calls: usize,
    deferred: Vec<Option<oneshot::Sender<Result<(), HostRejection>>>>,
}

#[derive(Clone)]
/// Share capability double. Clones share state.
pub struct MemoryShareCapability {
    inner: Rc<RefCell<CapabilityState>>,
}

impl MemoryShareCapability {
    fn with_support(secure_context: bool, share_supported: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CapabilityState {
                secure_context,
                share_supported,
                can_share: None,
                behavior: MemoryShareBehavior::default(),
                invocations: Vec::new(),
                can_share_calls: 0,
                deferred: Vec::new(),
            })),
        }
    }

    /// Secure context with a share invocation and no capability check.
    pub fn supported() -> Self {
        Self::with_support(true, true)
    }

    /// Insecure context; the share invocation exists but is unusable.
    pub fn insecure() -> Self {
        Self::with_support(false, true)
    }

    /// Secure context without a share invocation.
    pub fn without_share() -> Self {
        Self::with_support(true, false)
    }

    /// Installs a capability-check function.
    pub fn with_can_share(self, check: impl Fn(&ShareRequest) -> bool + 'static) -> Self {
        self.inner.borrow_mut().can_share = Some(Rc::new(check));
        self
    }

    /// Sets how later invocations settle.
    pub fn with_behavior(self, behavior: MemoryShareBehavior) -> Self {
        self.inner.borrow_mut().behavior = behavior;
        self
    }

    /// Returns every request passed to the share invocation, in order.
    pub fn invocations(&self) -> Vec<ShareRequest> {
        self.inner.borrow().invocations.clone()
    }

    /// Returns how many times the capability check ran.
    pub fn can_share_calls(&self) -> usize {
        self.inner.borrow().can_share_calls
    }

    /// Settles the `index`-th deferred invocation. Returns `false` if it was already settled or
    /// never deferred.
    pub fn settle(&self, index: usize, outcome: Result<(), HostRejection>) -> bool {
        let sender = self
            .inner
            .borrow_mut()
            .deferred
            .get_mut(index)
            .and_then(Option::take);
        sender.is_some_and(|sender| sender.send(outcome).is_ok())
    }
}

impl fmt::Debug for MemoryShareCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("MemoryShareCapability")
            .field("secure_context", &state.secure_context)
            .field("share_supported", &state.share_supported)
            .field("can_share", &state.can_share.is_some())
            .field("behavior", &state.behavior)
            .field("invocations", &state.invocations.len())
            .finish()
    }
}

impl ShareCapability for MemoryShareCapability {
    type Error = HostRejection;

    fn is_secure_context(&self) -> bool {
        self.inner.borrow().secure_context
    }

    fn is_share_supported(&self) -> bool {
        self.inner.borrow().share_supported
    }

    fn can_share(&self, request: &ShareRequest) -> Option<bool> {
        let check = {
            let mut state = self.inner.borrow_mut();
            let check = state.can_share.clone()?;
            state.can_share_calls += 1;
            check
        };
        Some(check(request))
    }

    fn share(&self, request: &ShareRequest) -> ShareFuture<'static, Result<(), HostRejection>> {
        let mut state = self.inner.borrow_mut();
        state.invocations.push(request.clone());
        match state.behavior.clone() {
            MemoryShareBehavior::Resolve => Box::pin(async { Ok(()) }),
            MemoryShareBehavior::Reject(rejection) => Box::pin(async move { Err(rejection) }),
            MemoryShareBehavior::Defer => {
                let (tx, rx) = oneshot::channel();
                state.deferred.push(Some(tx));
                Box::pin(async move {
                    rx.await
                        .unwrap_or_else(|_| Err(HostRejection::cancelled()))
                })
            }
        }
    }
}
