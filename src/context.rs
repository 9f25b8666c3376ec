//! # Request Context Module
//!
//! Per-request mutable state shared by every handler invoked for one request.
//!
//! A [`RequestContext`] is created when a request enters the top-level entry
//! point and dropped when the response is finished. It is passed explicitly to
//! every handler; there is no ambient lookup by request identity.
//!
//! It carries:
//! - a typed key/value store for sharing data between handlers
//! - the parameter values extracted from the request path
//! - a single error slot; recording an error stops dispatch
//! - a skip flag asking the enclosing router to stop at its level

use http::StatusCode;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::DispatchError;
use crate::ids::RequestId;
use crate::path::ParamVec;

/// Per-request state threaded through every handler call
///
/// Dispatch is single-threaded per request, so the store needs no locking.
pub struct RequestContext {
    request_id: RequestId,
    store: HashMap<String, Box<dyn Any + Send + Sync>>,
    params: HashMap<String, String>,
    /// Shared so an error handler can borrow it while it stays recorded
    error: Option<Arc<DispatchError>>,
    /// Set once an error handler has consumed `error`
    error_handled: bool,
    skip: bool,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("request_id", &self.request_id)
            .field("keys", &self.store.keys().collect::<Vec<_>>())
            .field("params", &self.params)
            .field("error", &self.error)
            .field("skip", &self.skip)
            .finish()
    }
}

impl RequestContext {
    /// Create an empty context with a fresh request id
    #[must_use]
    pub fn new() -> Self {
        Self::with_request_id(RequestId::new())
    }

    #[must_use]
    pub fn with_request_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            store: HashMap::new(),
            params: HashMap::new(),
            error: None,
            error_handled: false,
            skip: false,
        }
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Store a value under `key`, replacing any existing value
    pub fn set<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.store.insert(key.into(), Box::new(value));
    }

    /// Retrieve the value for `key`
    ///
    /// Returns `None` if the key is absent or holds a value of another type.
    #[must_use]
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.store.get(key).and_then(|value| value.downcast_ref::<T>())
    }

    #[must_use]
    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.store
            .get_mut(key)
            .and_then(|value| value.downcast_mut::<T>())
    }

    /// Remove the value for `key`; returns whether it existed
    pub fn delete(&mut self, key: &str) -> bool {
        self.store.remove(key).is_some()
    }

    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    /// Value of the path parameter `name`, or `""` if absent
    #[must_use]
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).map(String::as_str).unwrap_or("")
    }

    #[must_use]
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Merge extracted parameters; later values win for repeated names
    pub(crate) fn fill_params(&mut self, params: ParamVec) {
        for (name, value) in params {
            self.params.insert(name.to_string(), value);
        }
    }

    /// Record an application error and stop dispatch
    ///
    /// The error travels up through enclosing routers until one with an error
    /// handler consumes it.
    ///
    /// # Panics
    ///
    /// Panics if an error was already recorded for this request. Two handlers
    /// reporting different errors is a programming mistake.
    #[allow(clippy::panic)]
    pub fn set_error(&mut self, err: impl Into<anyhow::Error>, status: StatusCode) {
        if self.error.is_some() {
            panic!("RequestContext: set_error called twice");
        }
        self.error = Some(Arc::new(DispatchError::Application {
            source: err.into(),
            status,
        }));
    }

    #[must_use]
    pub fn error(&self) -> Option<&DispatchError> {
        self.error.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether an error handler already consumed the recorded error
    #[must_use]
    pub fn is_error_handled(&self) -> bool {
        self.error_handled
    }

    /// Record a dispatch-generated error if the slot is free
    pub(crate) fn record_error(&mut self, err: DispatchError) -> bool {
        if self.error.is_some() {
            return false;
        }
        self.error = Some(Arc::new(err));
        true
    }

    /// Overwrite the recorded error, returning the previous one
    pub(crate) fn replace_error(&mut self, err: DispatchError) -> Option<Arc<DispatchError>> {
        self.error.replace(Arc::new(err))
    }

    /// The error to hand to an error handler
    ///
    /// An empty slot is filled with [`DispatchError::NotFound`]. The error
    /// stays recorded while its handler runs, so a second `set_error` from
    /// inside the handler still panics.
    pub(crate) fn pending_error(&mut self) -> Arc<DispatchError> {
        Arc::clone(
            self.error
                .get_or_insert_with(|| Arc::new(DispatchError::NotFound)),
        )
    }

    pub(crate) fn mark_error_handled(&mut self) {
        self.error_handled = true;
    }

    /// Ask the enclosing router to stop processing its entries
    ///
    /// The parent router continues with its next entry. Unlike an error or a
    /// written response this does not stop the whole dispatch. On a top-level
    /// router there is no parent, so the request ends as not found.
    pub fn skip_router(&mut self) {
        self.skip = true;
    }

    #[must_use]
    pub fn is_skip_requested(&self) -> bool {
        self.skip
    }

    /// Consume a pending skip request
    pub(crate) fn take_skip(&mut self) -> bool {
        std::mem::take(&mut self.skip)
    }
}
