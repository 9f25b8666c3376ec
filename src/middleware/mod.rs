//! Ready-made [`Handler`](crate::Handler)s for use as router middleware.

mod tracing;

pub use self::tracing::TracingMiddleware;
