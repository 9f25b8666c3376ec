//! # Path Module
//!
//! The path module turns path templates into executable matchers. Every Route and
//! every mounted sub-router owns exactly one compiled [`PathPattern`].
//!
//! ## Pattern Language
//!
//! | Token           | Meaning                                              |
//! |-----------------|------------------------------------------------------|
//! | `/literal`      | exact segment match                                  |
//! | `*`             | wildcard, matches any substring (including empty)    |
//! | `(text)`        | literal group, required as written                   |
//! | `(text)?`       | optional literal group                               |
//! | `?`             | makes the preceding character or token optional      |
//! | `:name`         | named parameter, default capture `[^/]+`             |
//! | `:name(regex)`  | named parameter with a custom capture sub-pattern    |
//!
//! ## Matchers
//!
//! Compilation picks the cheapest [`Matcher`] able to answer for the pattern:
//!
//! - `/*` compiles to [`Matcher::All`], which never inspects the path
//! - patterns without parameters, wildcards or optional parts compile to
//!   [`Matcher::Exact`] (or [`Matcher::Prefix`] when mounting a sub-router)
//! - everything else compiles to a [`regex::Regex`]
//!
//! ## Example
//!
//! ```rust
//! use routewerk::path::compile;
//!
//! let pattern = compile("/:a/fixed/:b", false, false).unwrap();
//! let names: Vec<&str> = pattern.param_names().iter().map(|n| n.as_ref()).collect();
//! assert_eq!(names, ["a", "b"]);
//!
//! let params = pattern.extract_params("/1/fixed/2");
//! assert_eq!(params[0].1, "1");
//! assert_eq!(params[1].1, "2");
//! ```

mod compiler;
mod error;
mod matcher;
#[cfg(test)]
mod tests;

pub use compiler::{compile, PathPattern};
pub use error::PatternError;
pub use matcher::{Matcher, MatcherKind};

use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
/// Most routes carry ≤4 parameters (e.g., `/users/:id/posts/:post_id`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Ordered `(name, value)` pairs extracted from a path, in the order the
/// parameters appear in the pattern.
///
/// Names are `Arc<str>` because they come from the compiled pattern and are
/// shared by every request; values are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;
