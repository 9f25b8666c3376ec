use super::{Route, Router};
use crate::context::RequestContext;
use crate::path::{ParamVec, PathPattern};
use crate::server::{Request, ResponseSink};

/// Anything a router can hold in its ordered entry list
///
/// Implemented by [`Route`] and by mounted [`Router`]s. Matching runs against
/// the path local to the router holding the entry.
pub trait PathHandler: Send + Sync {
    fn pattern(&self) -> &PathPattern;

    #[inline]
    fn is_match(&self, path: &str) -> bool {
        self.pattern().is_match(path)
    }

    fn extract_params(&self, path: &str) -> ParamVec {
        self.pattern().extract_params(path)
    }

    fn dispatch(&self, ctx: &mut RequestContext, req: &Request, res: &mut dyn ResponseSink);
}

/// One registration on a router, kept in registration order
pub(crate) enum Entry {
    Route(Route),
    Router(Router),
}

impl Entry {
    #[inline]
    pub(crate) fn as_path_handler(&self) -> &dyn PathHandler {
        match self {
            Entry::Route(route) => route,
            Entry::Router(router) => router,
        }
    }
}

/// Dispatch stops once a response was produced or an error recorded
#[inline]
pub(crate) fn is_done(ctx: &RequestContext, res: &dyn ResponseSink) -> bool {
    res.has_written() || ctx.has_error()
}
