//! A single path pattern with its middleware and per-method handler chains.

use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::entry::{is_done, PathHandler};
use crate::context::RequestContext;
use crate::handler::{Handler, SharedHandler};
use crate::path::PathPattern;
use crate::server::{Request, ResponseSink};

/// Methods registered by [`Route::all`]
pub const STANDARD_METHODS: [Method; 9] = [
    Method::CONNECT,
    Method::DELETE,
    Method::GET,
    Method::HEAD,
    Method::OPTIONS,
    Method::PATCH,
    Method::POST,
    Method::PUT,
    Method::TRACE,
];

/// A path pattern plus the handlers that run when it matches
///
/// When a request matches, the route's middleware runs first (regardless of
/// method), then the handlers registered for the request method, each in
/// registration order. The chain stops as soon as a handler writes a response,
/// records an error, or asks to skip the router.
pub struct Route {
    pattern: PathPattern,
    middleware: Vec<SharedHandler>,
    methods: HashMap<Method, Vec<SharedHandler>>,
}

macro_rules! method_shortcuts {
    ($($name:ident => $method:ident),* $(,)?) => {
        $(
            #[doc = concat!("Register a `", stringify!($method), "` handler")]
            pub fn $name<H: Handler>(&mut self, handler: H) -> &mut Self {
                self.method(Method::$method, handler)
            }
        )*
    };
}

impl Route {
    pub(crate) fn new(pattern: PathPattern) -> Self {
        Self {
            pattern,
            middleware: Vec::new(),
            methods: HashMap::new(),
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Append a handler that runs for every method
    pub fn middleware<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.middleware.push(Arc::new(handler));
        self
    }

    /// Append a handler for one method
    pub fn method<H: Handler>(&mut self, method: Method, handler: H) -> &mut Self {
        self.add_shared(method, Arc::new(handler));
        self
    }

    method_shortcuts! {
        get => GET,
        post => POST,
        put => PUT,
        delete => DELETE,
        patch => PATCH,
        head => HEAD,
        options => OPTIONS,
    }

    /// Register one handler for each of [`STANDARD_METHODS`]
    pub fn all<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.methods_shared(&STANDARD_METHODS, Arc::new(handler))
    }

    /// Register one handler for every standard method that has none yet
    pub fn rest<H: Handler>(&mut self, handler: H) -> &mut Self {
        let missing: Vec<Method> = STANDARD_METHODS
            .iter()
            .filter(|method| self.handlers_for(method).is_empty())
            .cloned()
            .collect();
        self.methods_shared(&missing, Arc::new(handler))
    }

    /// Register one handler for each method in `methods`
    pub fn methods<H: Handler>(&mut self, methods: &[Method], handler: H) -> &mut Self {
        self.methods_shared(methods, Arc::new(handler))
    }

    fn methods_shared(&mut self, methods: &[Method], handler: SharedHandler) -> &mut Self {
        for method in methods {
            self.add_shared(method.clone(), Arc::clone(&handler));
        }
        self
    }

    fn add_shared(&mut self, method: Method, handler: SharedHandler) {
        debug!(
            pattern = %self.pattern.source(),
            method = %method,
            "Route handler registered"
        );
        self.methods.entry(method).or_default().push(handler);
    }

    /// Handlers registered for `method`, in registration order
    #[must_use]
    pub fn handlers_for(&self, method: &Method) -> &[SharedHandler] {
        self.methods.get(method).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn middleware_len(&self) -> usize {
        self.middleware.len()
    }

    /// Whether any handler is registered for `method`
    #[must_use]
    pub fn allows(&self, method: &Method) -> bool {
        self.methods.contains_key(method)
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.source())
            .field("middleware", &self.middleware.len())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PathHandler for Route {
    fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    fn dispatch(&self, ctx: &mut RequestContext, req: &Request, res: &mut dyn ResponseSink) {
        let chain = self
            .middleware
            .iter()
            .chain(self.handlers_for(req.method()));
        for handler in chain {
            handler.handle(ctx, req, res);
            if is_done(ctx, res) || ctx.is_skip_requested() {
                return;
            }
        }
    }
}
