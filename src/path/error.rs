use std::fmt;

/// Path template compilation error
///
/// Returned at registration time by [`compile`](super::compile) and every
/// router operation that registers a pattern. Malformed templates are never
/// silently accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern is the empty string
    Empty,
    /// The pattern does not start with `/`
    MissingLeadingSlash,
    /// A `(` was never closed
    UnmatchedOpen {
        /// Byte offset of the opening parenthesis
        index: usize,
    },
    /// A `)` appeared without a matching `(`
    UnmatchedClose {
        /// Byte offset of the closing parenthesis
        index: usize,
    },
    /// A `:` was not followed by a parameter name
    MissingParamName {
        /// Byte offset of the `:`
        index: usize,
    },
    /// The assembled expression was rejected by the regex engine
    ///
    /// Usually caused by an invalid custom parameter sub-pattern such as `:id([)`.
    InvalidRegex {
        /// The path template as registered
        pattern: String,
        /// The regex engine's error message
        message: String,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Empty => write!(f, "invalid path pattern: paths must not be empty"),
            PatternError::MissingLeadingSlash => {
                write!(f, "invalid path pattern: paths must start with '/'")
            }
            PatternError::UnmatchedOpen { index } => {
                write!(f, "invalid path pattern: unmatched '(' at index {index}")
            }
            PatternError::UnmatchedClose { index } => {
                write!(f, "invalid path pattern: unmatched ')' at index {index}")
            }
            PatternError::MissingParamName { index } => {
                write!(f, "invalid path pattern: missing parameter name at index {index}")
            }
            PatternError::InvalidRegex { pattern, message } => {
                write!(f, "invalid path pattern '{pattern}': {message}")
            }
        }
    }
}

impl std::error::Error for PatternError {}
