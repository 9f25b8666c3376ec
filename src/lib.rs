//! # routewerk
//!
//! **routewerk** is an embeddable HTTP request router: a path pattern compiler
//! plus a hierarchical dispatch engine. It decides which application handlers
//! run for a request, in what order, with which extracted path parameters, and
//! what happens when nothing matches, a handler records an error, or a handler
//! panics.
//!
//! ## Overview
//!
//! - **[`path`]** - Compiles templates such as `/users/:id(\d+)/files/*` into
//!   matchers, with literal fast paths that never touch the regex engine
//! - **[`router`]** - [`Router`]s holding ordered [`Route`]s and mounted
//!   sub-routers; dispatch with middleware, parameter handlers, error handlers
//!   and optional panic recovery
//! - **[`context`]** - The per-request [`RequestContext`] passed to every handler
//! - **[`handler`]** - Handler traits and closure adapters
//! - **[`server`]** - Transport boundary: [`Request`], [`ResponseSink`] and the
//!   [`RouterService`] entry point
//! - **[`runtime_config`]** / **[`logging`]** - Environment and file
//!   configuration, and a `tracing` subscriber setup
//!
//! ## Pattern Language
//!
//! | Syntax | Meaning |
//! |---|---|
//! | `/abc` | literal |
//! | `*` | any run of characters, `/` included |
//! | `:name` | named segment, `[^/]+` |
//! | `:name(regex)` | named capture with a custom sub-pattern |
//! | `(text)?` | optional literal group |
//!
//! ## Example
//!
//! ```rust
//! use http::{Method, StatusCode};
//! use routewerk::{
//!     error_handler_fn, handler_fn, param_handler_fn, BufferedResponse, ResponseSink,
//!     ResponseSinkExt, Router, RouterService,
//! };
//!
//! let mut router = Router::new();
//! router.param("id", param_handler_fn(|ctx, _req, _res, id| {
//!     ctx.set("loaded", format!("record {id}"));
//! }));
//! router
//!     .get("/records/:id", handler_fn(|ctx, _req, res| {
//!         let body = ctx.get::<String>("loaded").cloned().unwrap_or_default();
//!         res.write_str(&body);
//!     }))
//!     .unwrap();
//! router.set_error_handler(error_handler_fn(|_ctx, _req, res, err| {
//!     res.set_status(err.status());
//!     res.write_str("nothing here");
//! }));
//!
//! let service = RouterService::new(router);
//!
//! let mut res = BufferedResponse::new();
//! service.dispatch(Method::GET, "/records/7", &mut res);
//! assert_eq!(res.body_str(), "record 7");
//!
//! let mut res = BufferedResponse::new();
//! service.dispatch(Method::GET, "/missing", &mut res);
//! assert_eq!(res.status(), Some(StatusCode::NOT_FOUND));
//! ```
//!
//! ## Logging
//!
//! The library emits `tracing` events and spans; see [`logging`] for a
//! ready-made subscriber. Registration logs at `info`, matching decisions at
//! `debug`, recovered panics at `error`.

pub mod cli;
pub mod context;
pub mod error;
pub mod handler;
pub mod ids;
pub mod logging;
pub mod middleware;
pub mod path;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use context::RequestContext;
pub use error::DispatchError;
pub use handler::{
    error_handler_fn, handler_fn, param_handler_fn, ErrorHandler, Handler, ParamHandler,
    StandardErrorHandler,
};
pub use ids::RequestId;
pub use path::{compile, PathPattern, PatternError};
pub use router::{PathHandler, Route, Router};
pub use runtime_config::RouterConfig;
pub use server::{BufferedResponse, Request, ResponseSink, ResponseSinkExt, RouterService};
