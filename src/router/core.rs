//! Router core module - registration and hierarchical dispatch.
//!
//! A [`Router`] owns an ordered list of entries (routes and mounted
//! sub-routers), parameter handlers keyed by name, and an optional error
//! handler. Dispatch walks the entries in registration order against the path
//! local to the router, invoking every match until one of them produces a
//! response, records an error, or asks to skip the router.

use http::Method;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

use super::entry::{is_done, Entry, PathHandler};
use super::Route;
use crate::context::RequestContext;
use crate::error::{panic_message, DispatchError};
use crate::handler::{ErrorHandler, Handler, ParamHandler, SharedErrorHandler, SharedParamHandler};
use crate::path::{compile, PathPattern, PatternError, MAX_INLINE_PARAMS};
use crate::runtime_config::RouterConfig;
use crate::server::{Request, ResponseSink};

/// How a pass over the entries ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Every matching entry ran without producing output
    Exhausted,
    /// A response was written or an error recorded
    Stopped,
    /// A handler asked to skip this router
    Skipped,
}

/// Hierarchical request router
///
/// Routers nest: [`mount`](Router::mount) and [`sub_router`](Router::sub_router)
/// attach a child under a path prefix. A child sees paths relative to its
/// mount point and can carry its own error handler, parameter handlers and
/// panic recovery.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use routewerk::{handler_fn, BufferedResponse, RequestContext, Request, ResponseSinkExt, Router};
///
/// let mut router = Router::new();
/// router
///     .get("/users/:id", handler_fn(|ctx, _req, res| {
///         let body = format!("user {}", ctx.param("id"));
///         res.write_str(&body);
///     }))
///     .unwrap();
///
/// let mut ctx = RequestContext::new();
/// let mut res = BufferedResponse::new();
/// router.dispatch(&mut ctx, &Request::new(Method::GET, "/users/42"), &mut res);
/// assert_eq!(res.body_str(), "user 42");
/// ```
pub struct Router {
    /// Prefix pattern this router is mounted under; matches all when unmounted
    mount_pattern: PathPattern,
    /// Prefix as given to `mount`, without trailing slash
    mount_prefix: String,
    /// Concatenated prefixes of this router and all its ancestors
    mount_path: String,
    /// Set once this router is attached under a parent
    mounted: bool,
    entries: Vec<Entry>,
    param_handlers: HashMap<String, Vec<SharedParamHandler>>,
    strict_slash: bool,
    panic_recovery: bool,
    error_handler: Option<SharedErrorHandler>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! method_shortcuts {
    ($($name:ident => $method:ident),* $(,)?) => {
        $(
            #[doc = concat!("Register a `", stringify!($method), "` handler on a new route")]
            ///
            /// # Errors
            ///
            /// Returns the [`PatternError`] if the template does not compile.
            pub fn $name<H: Handler>(
                &mut self,
                pattern: &str,
                handler: H,
            ) -> Result<&mut Route, PatternError> {
                self.method(Method::$method, pattern, handler)
            }
        )*
    };
}

impl Router {
    /// Create an unmounted router with lenient trailing slashes and no
    /// panic recovery
    #[must_use]
    pub fn new() -> Self {
        Self {
            mount_pattern: PathPattern::match_all(),
            mount_prefix: String::new(),
            mount_path: String::new(),
            mounted: false,
            entries: Vec::new(),
            param_handlers: HashMap::new(),
            strict_slash: false,
            panic_recovery: false,
            error_handler: None,
        }
    }

    /// Create a router with settings taken from `config`
    #[must_use]
    pub fn with_config(config: &RouterConfig) -> Self {
        let mut router = Self::new();
        router.strict_slash = config.strict_slash;
        router.panic_recovery = config.panic_recovery;
        router
    }

    /// Full prefix stripped from request paths before matching entries
    ///
    /// Empty for a top-level router.
    #[must_use]
    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    #[must_use]
    pub fn strict_slash(&self) -> bool {
        self.strict_slash
    }

    /// Distinguish `/a` from `/a/` for patterns registered from now on
    pub fn set_strict_slash(&mut self, strict: bool) -> &mut Self {
        self.strict_slash = strict;
        self
    }

    #[must_use]
    pub fn panic_recovery(&self) -> bool {
        self.panic_recovery
    }

    /// Catch panics raised while this router dispatches
    pub fn set_panic_recovery(&mut self, enabled: bool) -> &mut Self {
        self.panic_recovery = enabled;
        self
    }

    pub fn set_error_handler<E: ErrorHandler>(&mut self, handler: E) -> &mut Self {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    /// Remove the error handler; errors then bubble to the enclosing router
    pub fn clear_error_handler(&mut self) -> &mut Self {
        self.error_handler = None;
        self
    }

    #[must_use]
    pub fn has_error_handler(&self) -> bool {
        self.error_handler.is_some()
    }

    /// Number of routes and mounted routers registered directly on this router
    #[must_use]
    pub fn entries_len(&self) -> usize {
        self.entries.len()
    }

    /// Register a new route for `pattern` and return it for method registration
    ///
    /// # Errors
    ///
    /// Returns the [`PatternError`] if the template does not compile.
    pub fn route(&mut self, pattern: &str) -> Result<&mut Route, PatternError> {
        let pattern = compile(pattern, self.strict_slash, false)?;
        info!(
            mount_path = %self.mount_path,
            pattern = %pattern.source(),
            "Route registered"
        );
        Ok(self.push_route(Route::new(pattern)))
    }

    /// Register a handler for `method` on a new route
    ///
    /// # Errors
    ///
    /// Returns the [`PatternError`] if the template does not compile.
    pub fn method<H: Handler>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Route, PatternError> {
        let route = self.route(pattern)?;
        route.method(method, handler);
        Ok(route)
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

    /// Register one handler for every standard method on a new route
    ///
    /// # Errors
    ///
    /// Returns the [`PatternError`] if the template does not compile.
    pub fn all<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Route, PatternError> {
        let route = self.route(pattern)?;
        route.all(handler);
        Ok(route)
    }

    /// Register one handler for each method in `methods` on a new route
    ///
    /// # Errors
    ///
    /// Returns the [`PatternError`] if the template does not compile.
    pub fn methods<H: Handler>(
        &mut self,
        methods: &[Method],
        pattern: &str,
        handler: H,
    ) -> Result<&mut Route, PatternError> {
        let route = self.route(pattern)?;
        route.methods(methods, handler);
        Ok(route)
    }

    /// Append middleware that runs for every request reaching this position
    ///
    /// Middleware is an entry like any route, so it only sees requests that
    /// were not answered by earlier entries.
    pub fn use_middleware<H: Handler>(&mut self, handler: H) -> &mut Self {
        let route = self.push_route(Route::new(PathPattern::match_all()));
        route.middleware(handler);
        self
    }

    /// Register a handler for the path parameter `name`
    ///
    /// Runs once per request at this level, before the first matching entry
    /// that declares `name`. Several handlers for one name run in
    /// registration order.
    pub fn param<P: ParamHandler>(&mut self, name: &str, handler: P) -> &mut Self {
        self.param_handlers
            .entry(name.to_string())
            .or_default()
            .push(Arc::new(handler));
        self
    }

    /// Attach `child` under `prefix`
    ///
    /// The child matches every path starting with `prefix` and sees the path
    /// with its full mount path removed. `prefix` is compiled with this
    /// router's trailing-slash setting.
    ///
    /// # Errors
    ///
    /// Returns the [`PatternError`] if the prefix does not compile.
    pub fn mount(&mut self, prefix: &str, mut child: Router) -> Result<&mut Router, PatternError> {
        child.mount_pattern = compile(prefix, self.strict_slash, true)?;
        child.mount_prefix = prefix.trim_end_matches('/').to_string();
        child.mounted = true;
        child.rebase(&self.mount_path);
        info!(
            mount_path = %child.mount_path,
            prefix = %prefix,
            entries = child.entries.len(),
            "Router mounted"
        );
        Ok(self.push_router(child))
    }

    /// Create an empty child router mounted under `prefix`
    ///
    /// The child inherits the trailing-slash setting and starts without an
    /// error handler, so its errors bubble up here until it gets one.
    ///
    /// # Errors
    ///
    /// Returns the [`PatternError`] if the prefix does not compile.
    pub fn sub_router(&mut self, prefix: &str) -> Result<&mut Router, PatternError> {
        let mut child = Router::new();
        child.strict_slash = self.strict_slash;
        self.mount(prefix, child)
    }

    /// Recompute mount paths after this router moved under a new parent
    fn rebase(&mut self, parent_mount_path: &str) {
        self.mount_path = format!("{parent_mount_path}{}", self.mount_prefix);
        for entry in &mut self.entries {
            if let Entry::Router(child) = entry {
                child.rebase(&self.mount_path);
            }
        }
    }

    #[allow(clippy::unreachable)]
    fn push_route(&mut self, route: Route) -> &mut Route {
        self.entries.push(Entry::Route(route));
        match self.entries.last_mut() {
            Some(Entry::Route(route)) => route,
            _ => unreachable!("last entry was just pushed as a route"),
        }
    }

    #[allow(clippy::unreachable)]
    fn push_router(&mut self, router: Router) -> &mut Router {
        self.entries.push(Entry::Router(router));
        match self.entries.last_mut() {
            Some(Entry::Router(router)) => router,
            _ => unreachable!("last entry was just pushed as a router"),
        }
    }

    /// Dispatch a request through this router and its mounted children
    ///
    /// Runs matching entries in registration order. When the pass ends
    /// without output and this router has an error handler, the handler is
    /// called once with the recorded error, or [`DispatchError::NotFound`].
    /// Without an error handler the outcome is left in `ctx` for the caller.
    pub fn dispatch(&self, ctx: &mut RequestContext, req: &Request, res: &mut dyn ResponseSink) {
        if !self.panic_recovery {
            self.serve(ctx, req, res);
            return;
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.serve(ctx, req, res)));
        if let Err(payload) = outcome {
            self.recover(ctx, req, res, panic_message(payload.as_ref()));
        }
    }

    fn serve(&self, ctx: &mut RequestContext, req: &Request, res: &mut dyn ResponseSink) {
        let flow = self.run_entries(ctx, req, res);
        // A skip hands control back to the parent; a top-level router has none
        if flow == Flow::Skipped && self.mounted && !is_done(ctx, res) {
            debug!(mount_path = %self.mount_path, path = %req.path(), "Router skipped");
            return;
        }
        self.finish(ctx, req, res);
    }

    fn run_entries(&self, ctx: &mut RequestContext, req: &Request, res: &mut dyn ResponseSink) -> Flow {
        let path = self.local_path(req.path());
        let mut invoked: SmallVec<[&str; MAX_INLINE_PARAMS]> = SmallVec::new();

        for entry in &self.entries {
            let handler = entry.as_path_handler();
            if !handler.is_match(path) {
                continue;
            }
            let pattern = handler.pattern();
            debug!(
                mount_path = %self.mount_path,
                pattern = %pattern.source(),
                path = %path,
                "Entry matched"
            );

            if pattern.contains_params() {
                ctx.fill_params(handler.extract_params(path));
                for name in pattern.param_names() {
                    let name: &str = name;
                    if invoked.contains(&name) {
                        continue;
                    }
                    invoked.push(name);
                    let flow = self.run_param_handlers(name, ctx, req, res);
                    if flow != Flow::Exhausted {
                        return flow;
                    }
                }
            }

            handler.dispatch(ctx, req, res);
            if ctx.take_skip() {
                return Flow::Skipped;
            }
            if is_done(ctx, res) {
                return Flow::Stopped;
            }
        }
        Flow::Exhausted
    }

    fn run_param_handlers(
        &self,
        name: &str,
        ctx: &mut RequestContext,
        req: &Request,
        res: &mut dyn ResponseSink,
    ) -> Flow {
        let Some(handlers) = self.param_handlers.get(name) else {
            return Flow::Exhausted;
        };
        let value = ctx.param(name).to_owned();
        for handler in handlers {
            trace!(mount_path = %self.mount_path, param = %name, value = %value, "Param handler invoked");
            handler.handle(ctx, req, res, &value);
            if ctx.take_skip() {
                return Flow::Skipped;
            }
            if is_done(ctx, res) {
                return Flow::Stopped;
            }
        }
        Flow::Exhausted
    }

    /// Hand the outcome of a pass to the error handler, at most once
    fn finish(&self, ctx: &mut RequestContext, req: &Request, res: &mut dyn ResponseSink) {
        if res.has_written() || ctx.is_error_handled() {
            return;
        }
        let Some(handler) = &self.error_handler else {
            return;
        };

        let err = ctx.pending_error();
        if err.is_not_found() {
            warn!(mount_path = %self.mount_path, path = %req.path(), "No entry produced a response");
        } else {
            warn!(
                mount_path = %self.mount_path,
                path = %req.path(),
                status = err.status().as_u16(),
                error = %err,
                "Dispatch ended with an error"
            );
        }
        debug!(status = err.status().as_u16(), error = %err, "Error handler invoked");
        handler.handle(ctx, req, res, &err);
        ctx.mark_error_handled();
    }

    fn recover(&self, ctx: &mut RequestContext, req: &Request, res: &mut dyn ResponseSink, message: String) {
        error!(
            request_id = %ctx.request_id(),
            mount_path = %self.mount_path,
            method = %req.method(),
            path = %req.path(),
            panic = %message,
            "Handler panicked"
        );
        ctx.take_skip();
        let err = DispatchError::Panic { message };

        match &self.error_handler {
            Some(handler) if !res.has_written() => {
                if let Some(previous) = ctx.replace_error(err) {
                    warn!(error = %previous, "Error recorded before the panic was replaced");
                }
                let err = ctx.pending_error();
                handler.handle(ctx, req, res, &err);
                ctx.mark_error_handled();
            }
            _ => {
                if !ctx.record_error(err) {
                    warn!(mount_path = %self.mount_path, "Panic not recorded, an error is already pending");
                }
            }
        }
    }

    /// Request path with this router's mount path removed
    pub(super) fn local_path<'p>(&self, path: &'p str) -> &'p str {
        match path.strip_prefix(self.mount_path.as_str()) {
            Some("") => "/",
            Some(rest) => rest,
            None => path,
        }
    }
}

impl PathHandler for Router {
    fn pattern(&self) -> &PathPattern {
        &self.mount_pattern
    }

    fn dispatch(&self, ctx: &mut RequestContext, req: &Request, res: &mut dyn ResponseSink) {
        Router::dispatch(self, ctx, req, res);
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("mount_path", &self.mount_path)
            .field("entries", &self.entries.len())
            .field("param_handlers", &self.param_handlers.keys().collect::<Vec<_>>())
            .field("strict_slash", &self.strict_slash)
            .field("panic_recovery", &self.panic_recovery)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}
