//! # Server Module
//!
//! The boundary between a transport and the router.
//!
//! - [`Request`] - method, sanitized path and request id seen by handlers
//! - [`ResponseSink`] - where handlers write; [`BufferedResponse`] collects
//!   output in memory
//! - [`RouterService`] - the per-request entry point that creates the
//!   context, dispatches and guarantees a response
//!
//! No network listener lives here. A transport adapter maps its own request
//! and response types onto these.

mod request;
mod response;
mod service;

pub use request::{sanitize_path, Request};
pub use response::{BufferedResponse, ResponseSink, ResponseSinkExt};
pub use service::RouterService;
