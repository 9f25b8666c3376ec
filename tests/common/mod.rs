#![allow(dead_code)]

use http::Method;
use parking_lot::Mutex;
use routewerk::{
    error_handler_fn, handler_fn, BufferedResponse, ErrorHandler, Handler, Request,
    RequestContext, ResponseSinkExt, Router,
};
use std::sync::Arc;

/// Ordered log of handler invocations shared by every handler of a test
#[derive(Clone, Default)]
pub struct History(Arc<Mutex<Vec<String>>>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }

    /// Handler that records `label` and lets dispatch continue
    pub fn record(&self, label: &'static str) -> impl Handler {
        let history = self.clone();
        handler_fn(move |_ctx, _req, _res| history.push(label))
    }

    /// Handler that records `label` and writes `body`
    pub fn respond(&self, label: &'static str, body: &'static str) -> impl Handler {
        let history = self.clone();
        handler_fn(move |_ctx, _req, res| {
            history.push(label);
            res.write_str(body);
        })
    }

    /// Handler that records `label` and sets an error
    pub fn fail(&self, label: &'static str, message: &'static str) -> impl Handler {
        let history = self.clone();
        handler_fn(move |ctx, _req, _res| {
            history.push(label);
            ctx.set_error(anyhow::anyhow!(message), http::StatusCode::BAD_REQUEST);
        })
    }

    /// Error handler that records `label: <error>` without writing
    pub fn catch(&self, label: &'static str) -> impl ErrorHandler {
        let history = self.clone();
        error_handler_fn(move |_ctx, _req, _res, err| history.push(format!("{label}: {err}")))
    }
}

/// Dispatch one request directly through `router`
pub fn send(router: &Router, method: Method, path: &str) -> (RequestContext, BufferedResponse) {
    let mut ctx = RequestContext::new();
    let mut res = BufferedResponse::new();
    router.dispatch(&mut ctx, &Request::new(method, path), &mut res);
    (ctx, res)
}

pub fn get(router: &Router, path: &str) -> (RequestContext, BufferedResponse) {
    send(router, Method::GET, path)
}
