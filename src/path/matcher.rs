use regex::Regex;
use std::fmt;

/// Compiled, executable form of a path pattern
///
/// Only [`Matcher::Pattern`] runs the regex engine; the other variants are
/// plain string comparisons.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Matches every path (`/*`)
    All,
    /// Matches one literal path
    Exact {
        /// The literal path. Without `strict`, stored without a trailing slash.
        path: String,
        /// When false, one trailing slash on the request path is ignored
        strict: bool,
    },
    /// Matches every path starting with the literal prefix
    Prefix(String),
    /// Matches through a compiled regular expression
    Pattern(Regex),
}

/// Matcher variant without its payload, for diagnostics and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    All,
    Exact,
    Prefix,
    Pattern,
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatcherKind::All => "all",
            MatcherKind::Exact => "exact",
            MatcherKind::Prefix => "prefix",
            MatcherKind::Pattern => "pattern",
        };
        f.write_str(name)
    }
}

impl Matcher {
    /// Test a normalized request path
    #[inline]
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Exact { path: expected, strict } => {
                let path = if !*strict && path != "/" {
                    path.strip_suffix('/').unwrap_or(path)
                } else {
                    path
                };
                expected == path
            }
            Matcher::Prefix(prefix) => path.starts_with(prefix.as_str()),
            Matcher::Pattern(regex) => regex.is_match(path),
        }
    }

    #[must_use]
    pub fn kind(&self) -> MatcherKind {
        match self {
            Matcher::All => MatcherKind::All,
            Matcher::Exact { .. } => MatcherKind::Exact,
            Matcher::Prefix(_) => MatcherKind::Prefix,
            Matcher::Pattern(_) => MatcherKind::Pattern,
        }
    }

    /// The compiled regular expression, if this matcher has one
    #[must_use]
    pub fn regex(&self) -> Option<&Regex> {
        match self {
            Matcher::Pattern(regex) => Some(regex),
            _ => None,
        }
    }
}
