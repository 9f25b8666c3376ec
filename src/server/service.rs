use arc_swap::ArcSwap;
use http::Method;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, info_span, warn};

use super::request::Request;
use super::response::ResponseSink;
use crate::context::RequestContext;
use crate::error::{panic_message, DispatchError};
use crate::handler::{ErrorHandler, StandardErrorHandler};
use crate::router::Router;
use crate::runtime_config::RouterConfig;

/// Top-level entry point a transport adapter calls once per request
///
/// Sanitizes the path, creates the per-request context, runs the router and
/// guarantees a response: when dispatch leaves the sink untouched, the
/// standard error handler answers with the recorded error or `404 Not Found`.
///
/// The router sits behind an [`ArcSwap`], so a fully built replacement can be
/// installed while requests are in flight; each request sees one consistent
/// router.
pub struct RouterService {
    router: ArcSwap<Router>,
    panic_recovery: bool,
}

impl RouterService {
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self {
            router: ArcSwap::from_pointee(router),
            panic_recovery: false,
        }
    }

    /// Create a service whose outermost recovery boundary follows `config`
    #[must_use]
    pub fn with_config(router: Router, config: &RouterConfig) -> Self {
        let mut service = Self::new(router);
        service.panic_recovery = config.panic_recovery;
        service
    }

    /// Catch panics that escape the router and answer them with `500`
    pub fn set_panic_recovery(&mut self, enabled: bool) -> &mut Self {
        self.panic_recovery = enabled;
        self
    }

    /// The router currently serving requests
    #[must_use]
    pub fn router(&self) -> Arc<Router> {
        self.router.load_full()
    }

    /// Install a new router; returns the one it replaces
    pub fn replace_router(&self, router: Router) -> Arc<Router> {
        info!(entries = router.entries_len(), "Router replaced");
        self.router.swap(Arc::new(router))
    }

    /// Dispatch with a fresh context
    pub fn dispatch(&self, method: Method, path: &str, res: &mut dyn ResponseSink) -> RequestContext {
        self.dispatch_with(method, path, |req| RequestContext::with_request_id(req.request_id()), res)
    }

    /// Dispatch with a caller-supplied context factory
    ///
    /// The factory lets the transport seed the context, e.g. with
    /// authentication data, before any handler runs. The context is returned
    /// for inspection once the response is complete.
    pub fn dispatch_with<F>(
        &self,
        method: Method,
        path: &str,
        make_context: F,
        res: &mut dyn ResponseSink,
    ) -> RequestContext
    where
        F: FnOnce(&Request) -> RequestContext,
    {
        self.serve(Request::new(method, path), make_context, res)
    }

    /// Dispatch an already constructed request
    pub fn serve<F>(&self, req: Request, make_context: F, res: &mut dyn ResponseSink) -> RequestContext
    where
        F: FnOnce(&Request) -> RequestContext,
    {
        let span = info_span!(
            "request",
            request_id = %req.request_id(),
            method = %req.method(),
            path = %req.path(),
        );
        let _entered = span.enter();
        let start = Instant::now();

        let mut ctx = make_context(&req);
        let router = self.router.load();

        if self.panic_recovery {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| router.dispatch(&mut ctx, &req, res)));
            if let Err(payload) = outcome {
                let message = panic_message(payload.as_ref());
                error!(panic = %message, "Handler panicked outside any recovering router");
                ctx.replace_error(DispatchError::Panic { message });
                if !res.has_written() {
                    let err = ctx.pending_error();
                    StandardErrorHandler.handle(&mut ctx, &req, res, &err);
                }
                ctx.mark_error_handled();
            }
        } else {
            router.dispatch(&mut ctx, &req, res);
        }

        if !res.has_written() {
            let err = ctx.pending_error();
            if !err.is_not_found() && !ctx.is_error_handled() {
                warn!(error = %err, "Unhandled dispatch error");
            }
            StandardErrorHandler.handle(&mut ctx, &req, res, &err);
            ctx.mark_error_handled();
        }

        info!(
            status = res.status().map(|s| s.as_u16()),
            duration_us = start.elapsed().as_micros() as u64,
            "Request dispatched"
        );
        ctx
    }
}

impl std::fmt::Debug for RouterService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterService")
            .field("router", &self.router.load_full())
            .field("panic_recovery", &self.panic_recovery)
            .finish()
    }
}
