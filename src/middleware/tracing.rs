use tracing::debug;

use crate::context::RequestContext;
use crate::handler::Handler;
use crate::server::{Request, ResponseSink};

/// Logs every request reaching its position in the router
///
/// Never writes a response, so dispatch continues with the next entry.
///
/// ```rust
/// use routewerk::middleware::TracingMiddleware;
/// use routewerk::Router;
///
/// let mut router = Router::new();
/// router.use_middleware(TracingMiddleware);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

impl Handler for TracingMiddleware {
    fn handle(&self, ctx: &mut RequestContext, req: &Request, _res: &mut dyn ResponseSink) {
        debug!(
            request_id = %ctx.request_id(),
            method = %req.method(),
            path = %req.path(),
            params = ?ctx.params(),
            "Request reached middleware"
        );
    }
}
