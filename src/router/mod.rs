//! # Router Module
//!
//! Route registration and hierarchical request dispatch.
//!
//! ## Overview
//!
//! A [`Router`] holds an ordered list of entries. Each entry is either a
//! [`Route`] (a compiled path pattern with middleware and per-method handler
//! chains) or another `Router` mounted under a path prefix. Both implement
//! [`PathHandler`].
//!
//! ## Dispatch
//!
//! For each request a router:
//!
//! 1. Strips its mount path from the request path
//! 2. Walks its entries in registration order; for every entry whose pattern
//!    matches, extracts path parameters, runs parameter handlers for names not
//!    yet seen at this level, then dispatches the entry
//! 3. Stops as soon as a response is written or an error is recorded; a skip
//!    request ends only this level
//! 4. If nothing was written, hands the recorded error (or "not found") to its
//!    error handler, or leaves it for the enclosing router when it has none
//!
//! Handlers never run concurrently for one request. Registration happens
//! before serving; a built router is shared read-only between requests.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use routewerk::{handler_fn, BufferedResponse, RequestContext, Request, ResponseSinkExt, Router};
//!
//! let mut router = Router::new();
//! router.use_middleware(handler_fn(|ctx, _req, _res| ctx.set("seen", true)));
//! let api = router.sub_router("/api").unwrap();
//! api.get("/ping", handler_fn(|_ctx, _req, res| res.write_str("pong")))
//!     .unwrap();
//!
//! let mut ctx = RequestContext::new();
//! let mut res = BufferedResponse::new();
//! router.dispatch(&mut ctx, &Request::new(Method::GET, "/api/ping"), &mut res);
//! assert_eq!(res.body_str(), "pong");
//! assert_eq!(ctx.get::<bool>("seen"), Some(&true));
//! ```

mod core;
mod entry;
mod route;
#[cfg(test)]
mod tests;

pub use self::core::Router;
pub use entry::PathHandler;
pub use route::{Route, STANDARD_METHODS};
