//! Trigger discovery, support detection, and per-activation share flow.

use std::{cell::Cell, fmt, rc::Rc};

use leptos::logging;

use crate::{
    callbacks::ShareCallbacks,
    config::ShareTriggerConfig,
    error::{InitError, ShareError},
    host::{
        ActivationEvent, ActivationHandler, ActivationOutcome, ShareCapability, ShareDocument,
        ShareFuture, TriggerElement,
    },
    request::resolve_share_request,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why the environment cannot share.
pub enum UnsupportedReason {
    /// The page is not served from a secure context.
    InsecureContext,
    /// The host exposes no share invocation.
    ShareUnavailable,
}

impl UnsupportedReason {
    /// Returns the diagnostic logged when triggers are hidden.
    pub const fn message(self) -> &'static str {
        match self {
            Self::InsecureContext => "Web Share API is unavailable in insecure context.",
            Self::ShareUnavailable => "Web Share API is not supported in this browser.",
        }
    }
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Terminal state reached by [`ShareTriggerController::init`].
pub enum InitOutcome {
    /// No element matched the selector; nothing was touched.
    NoTriggers,
    /// Sharing is unavailable; every matched trigger was hidden.
    Unsupported {
        /// Failed check.
        reason: UnsupportedReason,
        /// Number of triggers hidden.
        hidden: usize,
    },
    /// Handlers were attached.
    Active {
        /// Number of triggers now listening.
        bound: usize,
    },
}

/// Binds share handlers to the triggers of one document.
///
/// Initialization runs at most once. Unsupported environments hide their triggers for the
/// controller's lifetime; triggers on supported hosts are never hidden or re-shown.
pub struct ShareTriggerController<D: ShareDocument, C: ShareCapability> {
    document: Rc<D>,
    capability: Rc<C>,
    config: ShareTriggerConfig,
    callbacks: Rc<ShareCallbacks<D::Trigger, C::Error>>,
    outcome: Cell<Option<InitOutcome>>,
}

impl<D: ShareDocument, C: ShareCapability> ShareTriggerController<D, C> {
    /// Creates a controller without touching the document.
    pub fn new(
        document: D,
        capability: C,
        config: ShareTriggerConfig,
        callbacks: ShareCallbacks<D::Trigger, C::Error>,
    ) -> Self {
        Self {
            document: Rc::new(document),
            capability: Rc::new(capability),
            config,
            callbacks: Rc::new(callbacks),
            outcome: Cell::new(None),
        }
    }

    /// Creates a controller and initializes it immediately.
    ///
    /// # Errors
    ///
    /// Returns an error when the document rejects the configured selector.
    pub fn mount(
        document: D,
        capability: C,
        config: ShareTriggerConfig,
        callbacks: ShareCallbacks<D::Trigger, C::Error>,
    ) -> Result<Self, InitError> {
        let controller = Self::new(document, capability, config, callbacks);
        controller.init()?;
        Ok(controller)
    }

    /// Returns the initialization outcome, if [`Self::init`] has completed.
    pub fn outcome(&self) -> Option<InitOutcome> {
        self.outcome.get()
    }

    /// Discovers triggers and either hides them or attaches activation handlers.
    ///
    /// Later calls return the first outcome without querying the document again.
    ///
    /// # Errors
    ///
    /// Returns an error when the document rejects the configured selector.
    pub fn init(&self) -> Result<InitOutcome, InitError> {
        if let Some(outcome) = self.outcome.get() {
            return Ok(outcome);
        }

        let triggers = self
            .document
            .query_triggers(&self.config.selector)
            .map_err(|reason| InitError::Query {
                selector: self.config.selector.clone(),
                reason,
            })?;

        let outcome = if triggers.is_empty() {
            InitOutcome::NoTriggers
        } else if let Some(reason) = self.unsupported_reason() {
            for trigger in &triggers {
                trigger.set_hidden(&self.config.hidden_attribute_value);
            }
            logging::warn!("[webshare] {reason}");
            InitOutcome::Unsupported {
                reason,
                hidden: triggers.len(),
            }
        } else {
            let bound = triggers
                .iter()
                .filter(|trigger| self.bind(trigger))
                .count();
            InitOutcome::Active { bound }
        };

        self.outcome.set(Some(outcome));
        Ok(outcome)
    }

    fn unsupported_reason(&self) -> Option<UnsupportedReason> {
        if !self.capability.is_secure_context() {
            Some(UnsupportedReason::InsecureContext)
        } else if !self.capability.is_share_supported() {
            Some(UnsupportedReason::ShareUnavailable)
        } else {
            None
        }
    }

    fn bind(&self, trigger: &D::Trigger) -> bool {
        let document = Rc::clone(&self.document);
        let capability = Rc::clone(&self.capability);
        let callbacks = Rc::clone(&self.callbacks);
        let target = trigger.clone();
        let handler: ActivationHandler = Rc::new(move |event: &dyn ActivationEvent| {
            activate(&*document, &capability, &callbacks, &target, event)
        });

        match trigger.bind_activation(handler) {
            Ok(()) => true,
            Err(err) => {
                logging::error!("[webshare] failed to bind trigger {trigger:?}: {err}");
                false
            }
        }
    }
}

impl<D: ShareDocument, C: ShareCapability> fmt::Debug for ShareTriggerController<D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareTriggerController")
            .field("config", &self.config)
            .field("outcome", &self.outcome.get())
            .finish_non_exhaustive()
    }
}

/// Runs one activation. Everything up to the native invocation happens before this returns.
fn activate<D: ShareDocument, C: ShareCapability>(
    document: &D,
    capability: &Rc<C>,
    callbacks: &Rc<ShareCallbacks<D::Trigger, C::Error>>,
    trigger: &D::Trigger,
    event: &dyn ActivationEvent,
) -> ShareFuture<'static, ActivationOutcome> {
    event.prevent_default();

    let request = resolve_share_request(&trigger.trigger_data(), &document.defaults());
    callbacks.emit_before_share(&request, trigger);

    if capability.can_share(&request) == Some(false) {
        callbacks.emit_error(&ShareError::NotShareable, trigger);
        return Box::pin(async { ActivationOutcome::NotShareable });
    }

    let pending = capability.share(&request);
    let callbacks = Rc::clone(callbacks);
    let trigger = trigger.clone();
    Box::pin(async move {
        match pending.await {
            Ok(()) => {
                callbacks.emit_success(&request, &trigger);
                ActivationOutcome::Shared
            }
            Err(err) => {
                callbacks.emit_error(&ShareError::Rejected(err), &trigger);
                ActivationOutcome::Failed
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::{DEFAULT_HIDDEN_VALUE, DEFAULT_TRIGGER_SELECTOR},
        error::HostRejection,
        memory::{MemoryShareBehavior, MemoryShareCapability, MemoryShareDocument, MemoryTrigger},
        request::{ShareRequest, TriggerData},
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Before(ShareRequest),
        Success(ShareRequest),
        Error(ShareError<HostRejection>),
    }

    type Log = Rc<RefCell<Vec<(Event, MemoryTrigger)>>>;

    fn recording_callbacks(log: &Log) -> ShareCallbacks<MemoryTrigger, HostRejection> {
        let before = Rc::clone(log);
        let success = Rc::clone(log);
        let failure = Rc::clone(log);
        ShareCallbacks::<MemoryTrigger, HostRejection>::silent()
            .before_share(move |request, trigger| {
                before
                    .borrow_mut()
                    .push((Event::Before(request.clone()), trigger.clone()));
            })
            .on_success(move |request, trigger| {
                success
                    .borrow_mut()
                    .push((Event::Success(request.clone()), trigger.clone()));
            })
            .on_error(move |error, trigger| {
                failure
                    .borrow_mut()
                    .push((Event::Error(error.clone()), trigger.clone()));
            })
    }

    fn events(log: &Log) -> Vec<Event> {
        log.borrow().iter().map(|(event, _)| event.clone()).collect()
    }

    fn page() -> MemoryShareDocument {
        MemoryShareDocument::new("https://example.com/page", Some("Example Page"))
    }

    fn mount(
        document: &MemoryShareDocument,
        capability: &MemoryShareCapability,
        log: &Log,
    ) -> ShareTriggerController<MemoryShareDocument, MemoryShareCapability> {
        ShareTriggerController::mount(
            document.clone(),
            capability.clone(),
            ShareTriggerConfig::default(),
            recording_callbacks(log),
        )
        .expect("mount")
    }

    fn page_request(text: &str) -> ShareRequest {
        ShareRequest {
            url: "https://example.com/page".to_string(),
            title: "Example Page".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn empty_document_is_left_untouched() {
        let document = page();
        let elsewhere = document.insert(".not-a-trigger", MemoryTrigger::default());
        let log = Log::default();
        let controller = mount(&document, &MemoryShareCapability::insecure(), &log);

        assert_eq!(controller.outcome(), Some(InitOutcome::NoTriggers));
        assert!(!elsewhere.is_hidden());
        assert_eq!(elsewhere.handler_count(), 0);
        assert!(events(&log).is_empty());
    }

    #[test]
    fn insecure_context_hides_every_trigger() {
        let document = page();
        let first = document.insert(DEFAULT_TRIGGER_SELECTOR, MemoryTrigger::default());
        let second = document.insert(DEFAULT_TRIGGER_SELECTOR, MemoryTrigger::default());
        let capability = MemoryShareCapability::insecure();
        let log = Log::default();
        let controller = mount(&document, &capability, &log);

        assert_eq!(
            controller.outcome(),
            Some(InitOutcome::Unsupported {
                reason: UnsupportedReason::InsecureContext,
                hidden: 2,
            })
        );
        for trigger in [&first, &second] {
            assert_eq!(trigger.hidden_value().as_deref(), Some(DEFAULT_HIDDEN_VALUE));
            assert_eq!(trigger.handler_count(), 0);
            assert_eq!(trigger.activate().handler_runs(), 0);
        }
        assert!(capability.invocations().is_empty());
    }

    #[test]
    fn missing_share_capability_hides_triggers() {
        let document = page();
        let trigger = document.insert(DEFAULT_TRIGGER_SELECTOR, MemoryTrigger::default());
        let log = Log::default();
        let controller = mount(&document, &MemoryShareCapability::without_share(), &log);

        assert_eq!(
            controller.outcome(),
            Some(InitOutcome::Unsupported {
                reason: UnsupportedReason::ShareUnavailable,
                hidden: 1,
            })
        );
        assert!(trigger.is_hidden());
        assert_eq!(trigger.handler_count(), 0);
    }

    #[test]
    fn init_runs_once() {
        let document = page();
        let trigger = document.insert(DEFAULT_TRIGGER_SELECTOR, MemoryTrigger::default());
        let log = Log::default();
        let controller = mount(&document, &MemoryShareCapability::supported(), &log);

        assert_eq!(controller.init(), Ok(InitOutcome::Active { bound: 1 }));
        assert_eq!(document.query_count(), 1);
        assert_eq!(trigger.handler_count(), 1);
        assert!(!trigger.is_hidden());
    }

    #[test]
    fn rejected_selector_surfaces_init_error() {
        let document = page();
        document.fail_queries("SyntaxError: '[' is not a valid selector");
        let controller = ShareTriggerController::new(
            document,
            MemoryShareCapability::supported(),
            ShareTriggerConfig {
                selector: "[".to_string(),
                ..ShareTriggerConfig::default()
            },
            ShareCallbacks::silent(),
        );

        assert_eq!(
            controller.init(),
            Err(InitError::Query {
                selector: "[".to_string(),
                reason: "SyntaxError: '[' is not a valid selector".to_string(),
            })
        );
        assert_eq!(controller.outcome(), None);
    }

    #[test]
    fn text_override_with_document_defaults_shares_successfully() {
        let document = page();
        let trigger = document.insert(
            DEFAULT_TRIGGER_SELECTOR,
            MemoryTrigger::new(TriggerData {
                text: Some("Check this out".to_string()),
                ..TriggerData::default()
            }),
        );
        let capability = MemoryShareCapability::supported();
        let log = Log::default();
        let _controller = mount(&document, &capability, &log);

        let activation = trigger.activate();
        assert!(activation.default_prevented);
        assert_eq!(block_on(activation.finish()), vec![ActivationOutcome::Shared]);

        let expected = page_request("Check this out");
        assert_eq!(capability.invocations(), vec![expected.clone()]);
        assert_eq!(capability.can_share_calls(), 0);
        assert_eq!(
            events(&log),
            vec![Event::Before(expected.clone()), Event::Success(expected)]
        );
        assert!(log.borrow().iter().all(|(_, seen)| *seen == trigger));
    }

    #[test]
    fn full_overrides_ignore_document_defaults() {
        let document = page();
        let data = TriggerData {
            url: Some("https://example.org/post".to_string()),
            title: Some("Post".to_string()),
            text: Some("Worth a read".to_string()),
        };
        let trigger = document.insert(DEFAULT_TRIGGER_SELECTOR, MemoryTrigger::new(data));
        let capability = MemoryShareCapability::supported();
        let log = Log::default();
        let _controller = mount(&document, &capability, &log);

        block_on(trigger.activate().finish());
        assert_eq!(
            capability.invocations(),
            vec![ShareRequest {
                url: "https://example.org/post".to_string(),
                title: "Post".to_string(),
                text: "Worth a read".to_string(),
            }]
        );
    }

    #[test]
    fn unshareable_payload_reports_error_without_invoking() {
        let document = page();
        let trigger = document.insert(DEFAULT_TRIGGER_SELECTOR, MemoryTrigger::default());
        let capability = MemoryShareCapability::supported().with_can_share(|_| false);
        let log = Log::default();
        let _controller = mount(&document, &capability, &log);

        assert_eq!(
            block_on(trigger.activate().finish()),
            vec![ActivationOutcome::NotShareable]
        );
        assert_eq!(capability.can_share_calls(), 1);
        assert!(capability.invocations().is_empty());
        assert_eq!(
            events(&log),
            vec![
                Event::Before(page_request("")),
                Event::Error(ShareError::NotShareable),
            ]
        );
    }

    #[test]
    fn accepted_payload_is_shared() {
        let document = page();
        let trigger = document.insert(DEFAULT_TRIGGER_SELECTOR, MemoryTrigger::default());
        let capability = MemoryShareCapability::supported()
            .with_can_share(|request| request.url.starts_with("https://"));
        let log = Log::default();
        let _controller = mount(&document, &capability, &log);

        assert_eq!(
            block_on(trigger.activate().finish()),
            vec![ActivationOutcome::Shared]
        );
        assert_eq!(capability.invocations(), vec![page_request("")]);
    }

    #[test]
    fn cancellation_reaches_on_error_unchanged() {
        let document = page();
        let trigger = document.insert(DEFAULT_TRIGGER_SELECTOR, MemoryTrigger::default());
        let capability = MemoryShareCapability::supported()
            .with_behavior(MemoryShareBehavior::Reject(HostRejection::cancelled()));
        let log = Log::default();
        let _controller = mount(&document, &capability, &log);

        assert_eq!(
            block_on(trigger.activate().finish()),
            vec![ActivationOutcome::Failed]
        );
        assert_eq!(
            events(&log),
            vec![
                Event::Before(page_request("")),
                Event::Error(ShareError::Rejected(HostRejection::cancelled())),
            ]
        );
    }

    #[test]
    fn failed_activation_does_not_affect_the_next_one() {
        let document = page();
        let trigger = document.insert(DEFAULT_TRIGGER_SELECTOR, MemoryTrigger::default());
        let capability = MemoryShareCapability::supported()
            .with_behavior(MemoryShareBehavior::Reject(HostRejection::permission_denied()));
        let log = Log::default();
        let _controller = mount(&document, &capability, &log);

        assert_eq!(
            block_on(trigger.activate().finish()),
            vec![ActivationOutcome::Failed]
        );
        assert_eq!(
            events(&log),
            vec![
                Event::Before(page_request("")),
                Event::Error(ShareError::Rejected(HostRejection::permission_denied())),
            ]
        );

        let capability = capability.with_behavior(MemoryShareBehavior::Resolve);
        document.set_location("https://example.com/next");

        assert_eq!(
            block_on(trigger.activate().finish()),
            vec![ActivationOutcome::Shared]
        );
        let next = ShareRequest {
            url: "https://example.com/next".to_string(),
            ..page_request("")
        };
        assert_eq!(capability.invocations().len(), 2);
        assert_eq!(
            events(&log)[2..].to_vec(),
            vec![Event::Before(next.clone()), Event::Success(next)]
        );
    }

    #[test]
    fn before_share_runs_ahead_of_invocation() {
        let document = page();
        let trigger = document.insert(DEFAULT_TRIGGER_SELECTOR, MemoryTrigger::default());
        let capability =
            MemoryShareCapability::supported().with_behavior(MemoryShareBehavior::Defer);
        let log = Log::default();
        let _controller = mount(&document, &capability, &log);

        let activation = trigger.activate();
        assert_eq!(events(&log), vec![Event::Before(page_request(""))]);
        assert_eq!(capability.invocations().len(), 1);

        assert!(capability.settle(0, Ok(())));
        block_on(activation.finish());
        assert_eq!(events(&log).len(), 2);
    }

    #[test]
    fn concurrent_activations_settle_independently() {
        let document = page();
        let first = document.insert(
            DEFAULT_TRIGGER_SELECTOR,
            MemoryTrigger::new(TriggerData {
                text: Some("first".to_string()),
                ..TriggerData::default()
            }),
        );
        let second = document.insert(
            DEFAULT_TRIGGER_SELECTOR,
            MemoryTrigger::new(TriggerData {
                text: Some("second".to_string()),
                ..TriggerData::default()
            }),
        );
        let capability =
            MemoryShareCapability::supported().with_behavior(MemoryShareBehavior::Defer);
        let log = Log::default();
        let controller = mount(&document, &capability, &log);
        assert_eq!(controller.outcome(), Some(InitOutcome::Active { bound: 2 }));

        let first_activation = first.activate();
        let second_activation = second.activate();

        assert!(capability.settle(1, Ok(())));
        assert_eq!(
            block_on(second_activation.finish()),
            vec![ActivationOutcome::Shared]
        );
        assert!(capability.settle(0, Err(HostRejection::cancelled())));
        assert_eq!(
            block_on(first_activation.finish()),
            vec![ActivationOutcome::Failed]
        );

        let log = log.borrow();
        let (last_success, success_trigger) = &log[2];
        assert_eq!(*last_success, Event::Success(page_request("second")));
        assert_eq!(*success_trigger, second);
        let (last_error, error_trigger) = &log[3];
        assert_eq!(
            *last_error,
            Event::Error(ShareError::Rejected(HostRejection::cancelled()))
        );
        assert_eq!(*error_trigger, first);
    }

    #[test]
    fn default_callbacks_survive_every_path() {
        let document = page();
        let trigger = document.insert(DEFAULT_TRIGGER_SELECTOR, MemoryTrigger::default());
        let capability = MemoryShareCapability::supported()
            .with_behavior(MemoryShareBehavior::Reject(HostRejection::cancelled()));
        let _controller = ShareTriggerController::mount(
            document,
            capability.clone(),
            ShareTriggerConfig::default(),
            ShareCallbacks::default(),
        )
        .expect("mount");

        assert_eq!(
            block_on(trigger.activate().finish()),
            vec![ActivationOutcome::Failed]
        );
        let capability = capability.with_behavior(MemoryShareBehavior::Resolve);
        assert_eq!(
            block_on(trigger.activate().finish()),
            vec![ActivationOutcome::Shared]
        );
        assert_eq!(capability.invocations().len(), 2);
    }
}
