//! # Handler Module
//!
//! Callback traits invoked during dispatch, plus closure adapters.
//!
//! All three callback kinds receive the per-request [`RequestContext`], the
//! [`Request`] and the [`ResponseSink`] explicitly:
//!
//! - [`Handler`] - middleware and method handlers registered on routes
//! - [`ParamHandler`] - called with the value of a named path parameter
//! - [`ErrorHandler`] - called once per router level with the error that ended dispatch
//!
//! Closures are adapted with [`handler_fn`], [`param_handler_fn`] and
//! [`error_handler_fn`]:
//!
//! ```rust
//! use routewerk::{handler_fn, ResponseSinkExt, Router};
//!
//! let mut router = Router::new();
//! router
//!     .get("/hello/:name", handler_fn(|ctx, _req, res| {
//!         let greeting = format!("hello {}", ctx.param("name"));
//!         res.write_str(&greeting);
//!     }))
//!     .unwrap();
//! ```

use http::header::{HeaderValue, CONTENT_TYPE};
use std::sync::Arc;

use crate::context::RequestContext;
use crate::error::DispatchError;
use crate::server::{Request, ResponseSink};

/// Middleware or method handler
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, ctx: &mut RequestContext, req: &Request, res: &mut dyn ResponseSink);
}

/// Handler bound to a named path parameter
///
/// Runs at most once per request per router level, before the first entry
/// whose pattern declares the parameter.
pub trait ParamHandler: Send + Sync + 'static {
    fn handle(
        &self,
        ctx: &mut RequestContext,
        req: &Request,
        res: &mut dyn ResponseSink,
        value: &str,
    );
}

/// Last handler in the chain, expected to always produce a response
pub trait ErrorHandler: Send + Sync + 'static {
    fn handle(
        &self,
        ctx: &mut RequestContext,
        req: &Request,
        res: &mut dyn ResponseSink,
        err: &DispatchError,
    );
}

/// Handler stored on a route; shared when registered for several methods
pub type SharedHandler = Arc<dyn Handler>;
pub type SharedParamHandler = Arc<dyn ParamHandler>;
pub type SharedErrorHandler = Arc<dyn ErrorHandler>;

/// A closure acting as a [`Handler`]
pub struct FnHandler<F>(F);

/// Adapt a closure into a [`Handler`]
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&mut RequestContext, &Request, &mut dyn ResponseSink) + Send + Sync + 'static,
{
    FnHandler(f)
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(&mut RequestContext, &Request, &mut dyn ResponseSink) + Send + Sync + 'static,
{
    #[inline]
    fn handle(&self, ctx: &mut RequestContext, req: &Request, res: &mut dyn ResponseSink) {
        (self.0)(ctx, req, res)
    }
}

/// A closure acting as a [`ParamHandler`]
pub struct FnParamHandler<F>(F);

/// Adapt a closure into a [`ParamHandler`]
pub fn param_handler_fn<F>(f: F) -> FnParamHandler<F>
where
    F: Fn(&mut RequestContext, &Request, &mut dyn ResponseSink, &str) + Send + Sync + 'static,
{
    FnParamHandler(f)
}

impl<F> ParamHandler for FnParamHandler<F>
where
    F: Fn(&mut RequestContext, &Request, &mut dyn ResponseSink, &str) + Send + Sync + 'static,
{
    #[inline]
    fn handle(
        &self,
        ctx: &mut RequestContext,
        req: &Request,
        res: &mut dyn ResponseSink,
        value: &str,
    ) {
        (self.0)(ctx, req, res, value)
    }
}

/// A closure acting as an [`ErrorHandler`]
pub struct FnErrorHandler<F>(F);

/// Adapt a closure into an [`ErrorHandler`]
pub fn error_handler_fn<F>(f: F) -> FnErrorHandler<F>
where
    F: Fn(&mut RequestContext, &Request, &mut dyn ResponseSink, &DispatchError)
        + Send
        + Sync
        + 'static,
{
    FnErrorHandler(f)
}

impl<F> ErrorHandler for FnErrorHandler<F>
where
    F: Fn(&mut RequestContext, &Request, &mut dyn ResponseSink, &DispatchError)
        + Send
        + Sync
        + 'static,
{
    #[inline]
    fn handle(
        &self,
        ctx: &mut RequestContext,
        req: &Request,
        res: &mut dyn ResponseSink,
        err: &DispatchError,
    ) {
        (self.0)(ctx, req, res, err)
    }
}

/// Default error handler
///
/// Responds with the error's status code and its message as plain text:
/// `404 Not Found` for unmatched requests, `500` for recovered panics and the
/// recorded status for application errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardErrorHandler;

impl ErrorHandler for StandardErrorHandler {
    fn handle(
        &self,
        _ctx: &mut RequestContext,
        _req: &Request,
        res: &mut dyn ResponseSink,
        err: &DispatchError,
    ) {
        res.set_header(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        res.set_status(err.status());
        res.write(err.to_string().as_bytes());
    }
}
