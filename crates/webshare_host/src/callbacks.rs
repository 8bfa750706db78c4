//! Lifecycle callback record with logging defaults.

use std::{fmt, rc::Rc};

use leptos::logging;

use crate::{error::ShareError, request::ShareRequest};

/// Callback receiving the resolved request and the trigger that started it.
pub type RequestCallback<T> = Rc<dyn Fn(&ShareRequest, &T)>;
/// Callback receiving the failure and the trigger that started it.
pub type ErrorCallback<T, E> = Rc<dyn Fn(&ShareError<E>, &T)>;

/// `before_share`, `on_success`, and `on_error` slots.
///
/// Unset slots log through `leptos::logging`. Return values of every slot are ignored.
pub struct ShareCallbacks<T, E> {
    before_share: RequestCallback<T>,
    on_success: RequestCallback<T>,
    on_error: ErrorCallback<T, E>,
}

impl<T: fmt::Debug + 'static, E: fmt::Display + 'static> Default for ShareCallbacks<T, E> {
    fn default() -> Self {
        Self {
            before_share: Rc::new(|request: &ShareRequest, trigger: &T| {
                logging::log!(
                    "[webshare] Native share triggered. data={request:?} trigger={trigger:?}"
                );
            }),
            on_success: Rc::new(|request: &ShareRequest, trigger: &T| {
                logging::log!(
                    "[webshare] Native share executed. data={request:?} trigger={trigger:?}"
                );
            }),
            on_error: Rc::new(|error: &ShareError<E>, trigger: &T| {
                logging::error!("[webshare] Native share failed: {error} trigger={trigger:?}");
            }),
        }
    }
}

impl<T: 'static, E: 'static> ShareCallbacks<T, E> {
    /// Callback record whose slots all do nothing.
    pub fn silent() -> Self {
        Self {
            before_share: Rc::new(|_: &ShareRequest, _: &T| {}),
            on_success: Rc::new(|_: &ShareRequest, _: &T| {}),
            on_error: Rc::new(|_: &ShareError<E>, _: &T| {}),
        }
    }
}

impl<T, E> ShareCallbacks<T, E> {
    /// Replaces the `before_share` slot.
    pub fn before_share(mut self, callback: impl Fn(&ShareRequest, &T) + 'static) -> Self {
        self.before_share = Rc::new(callback);
        self
    }

    /// Replaces the `on_success` slot.
    pub fn on_success(mut self, callback: impl Fn(&ShareRequest, &T) + 'static) -> Self {
        self.on_success = Rc::new(callback);
        self
    }

    /// Replaces the `on_error` slot.
    pub fn on_error(mut self, callback: impl Fn(&ShareError<E>, &T) + 'static) -> Self {
        self.on_error = Rc::new(callback);
        self
    }

    pub(crate) fn emit_before_share(&self, request: &ShareRequest, trigger: &T) {
        (self.before_share)(request, trigger);
    }

    pub(crate) fn emit_success(&self, request: &ShareRequest, trigger: &T) {
        (self.on_success)(request, trigger);
    }

    pub(crate) fn emit_error(&self, error: &ShareError<E>, trigger: &T) {
        (self.on_error)(error, trigger);
    }
}

impl<T, E> Clone for ShareCallbacks<T, E> {
    fn clone(&self) -> Self {
        Self {
            before_share: Rc::clone(&self.before_share),
            on_success: Rc::clone(&self.on_success),
            on_error: Rc::clone(&self.on_error),
        }
    }
}

impl<T, E> fmt::Debug for ShareCallbacks<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareCallbacks").finish_non_exhaustive()
    }
}
