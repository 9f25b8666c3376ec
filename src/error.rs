use http::StatusCode;
use std::fmt;

/// Error delivered to a router's error handler
///
/// Produced by dispatch in three ways: a handler recorded an application error
/// with [`RequestContext::set_error`](crate::RequestContext::set_error), no entry
/// produced a response, or a panic was recovered at a router with panic
/// recovery enabled.
#[derive(Debug)]
pub enum DispatchError {
    /// No entry matched, or no matching entry wrote a response
    NotFound,
    /// Error recorded by a handler
    Application {
        /// The underlying error
        source: anyhow::Error,
        /// Status code the handler asked for
        status: StatusCode,
    },
    /// Panic caught by a recovery boundary
    Panic {
        /// The panic payload rendered as text
        message: String,
    },
}

impl DispatchError {
    /// Status code an error handler should respond with
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::NotFound => StatusCode::NOT_FOUND,
            DispatchError::Application { status, .. } => *status,
            DispatchError::Panic { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::NotFound)
    }

    #[must_use]
    pub fn is_panic(&self) -> bool {
        matches!(self, DispatchError::Panic { .. })
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NotFound => {
                f.write_str(StatusCode::NOT_FOUND.canonical_reason().unwrap_or("Not Found"))
            }
            DispatchError::Application { source, .. } => write!(f, "{source}"),
            DispatchError::Panic { message } => write!(f, "Panic: {message}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Application { source, .. } => Some(&**source),
            _ => None,
        }
    }
}

/// Render a panic payload caught by `catch_unwind`
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        format!("{payload:?}")
    }
}
