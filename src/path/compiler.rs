//! Path template compiler - turns a pattern string into a [`PathPattern`].
//!
//! The compiler makes a single left-to-right pass over the template, escaping
//! literal runs and emitting regex fragments for wildcards, optional groups and
//! parameters. Patterns that turn out to be plain literals never reach the regex
//! engine.

use regex::Regex;
use smallvec::SmallVec;
use std::iter::Peekable;
use std::str::CharIndices;
use std::sync::Arc;
use tracing::debug;

use super::error::PatternError;
use super::matcher::Matcher;
use super::{ParamVec, MAX_INLINE_PARAMS};

/// Template that compiles to [`Matcher::All`]
const MATCH_ALL: &str = "/*";
/// Capture used by `:name` when no custom sub-pattern is given
const DEFAULT_PARAM_PATTERN: &str = "[^/]+";
const WILDCARD_PATTERN: &str = ".*";

type ParamNames = SmallVec<[Arc<str>; MAX_INLINE_PARAMS]>;

/// A compiled path template
///
/// Holds the [`Matcher`] and the ordered parameter names, in left-to-right
/// order of appearance in the template. Immutable after construction.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    matcher: Matcher,
    param_names: ParamNames,
    /// Capture group index for each entry of `param_names`
    groups: SmallVec<[usize; MAX_INLINE_PARAMS]>,
}

impl PathPattern {
    /// The catch-all pattern used for middleware registration
    #[must_use]
    pub fn match_all() -> Self {
        Self {
            source: MATCH_ALL.to_string(),
            matcher: Matcher::All,
            param_names: ParamNames::new(),
            groups: SmallVec::new(),
        }
    }

    /// The template this pattern was compiled from
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Parameter names in the order they appear in the template
    ///
    /// Duplicates are kept: `/:id/x/:id` yields `["id", "id"]`.
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    #[inline]
    #[must_use]
    pub fn contains_params(&self) -> bool {
        !self.param_names.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// Extract parameter values from a path
    ///
    /// Returns `(name, value)` pairs in template order. Returns an empty list
    /// when the pattern has no parameters or the path does not match.
    #[must_use]
    pub fn extract_params(&self, path: &str) -> ParamVec {
        let mut params = ParamVec::new();
        if !self.contains_params() {
            return params;
        }
        let Some(captures) = self.matcher.regex().and_then(|regex| regex.captures(path)) else {
            return params;
        };
        for (name, group) in self.param_names.iter().zip(&self.groups) {
            if let Some(value) = captures.get(*group) {
                params.push((Arc::clone(name), value.as_str().to_string()));
            }
        }
        params
    }
}

/// Compile a path template
///
/// # Arguments
///
/// * `pattern` - Path template, e.g. `/users/:id(\d+)/posts/*`
/// * `strict_slash` - When false, a path also matches with one trailing slash
///   appended (unless the template ends in a wildcard)
/// * `prefix_only` - When true, the matcher accepts every path starting with
///   the template (used for mounting sub-routers); otherwise the match is
///   anchored at both ends
///
/// # Errors
///
/// Returns a [`PatternError`] when the template is empty, does not start with
/// `/`, has unbalanced parentheses, declares a parameter without a name, or
/// carries a custom sub-pattern the regex engine rejects.
pub fn compile(
    pattern: &str,
    strict_slash: bool,
    prefix_only: bool,
) -> Result<PathPattern, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }
    if !pattern.starts_with('/') {
        return Err(PatternError::MissingLeadingSlash);
    }
    if pattern == MATCH_ALL {
        debug!(pattern = %pattern, matcher = "all", "Path pattern compiled");
        return Ok(PathPattern::match_all());
    }

    let parsed = Parser::new(pattern).parse()?;

    if parsed.simple {
        let matcher = if prefix_only {
            Matcher::Prefix(pattern.to_string())
        } else {
            let path = if strict_slash || pattern == "/" {
                pattern
            } else {
                pattern.strip_suffix('/').unwrap_or(pattern)
            };
            Matcher::Exact {
                path: path.to_string(),
                strict: strict_slash,
            }
        };
        debug!(pattern = %pattern, matcher = %matcher.kind(), "Path pattern compiled");
        return Ok(PathPattern {
            source: pattern.to_string(),
            matcher,
            param_names: ParamNames::new(),
            groups: SmallVec::new(),
        });
    }

    let mut expr = parsed.expr;
    if !strict_slash && !prefix_only && !parsed.ends_with_wildcard {
        if !expr.ends_with('/') {
            expr.push('/');
        }
        expr.push('?');
    }
    if !prefix_only {
        expr.push('$');
    }

    let invalid = |message: String| PatternError::InvalidRegex {
        pattern: pattern.to_string(),
        message,
    };
    let regex = Regex::new(&expr).map_err(|e| invalid(e.to_string()))?;

    let mut groups = SmallVec::new();
    for index in 0..parsed.params.len() {
        let name = group_name(index);
        let group = regex
            .capture_names()
            .position(|candidate| candidate == Some(name.as_str()))
            .ok_or_else(|| invalid(format!("capture group for parameter {index} is missing")))?;
        groups.push(group);
    }

    debug!(
        pattern = %pattern,
        matcher = "pattern",
        regex = %expr,
        params = ?parsed.params,
        "Path pattern compiled"
    );

    Ok(PathPattern {
        source: pattern.to_string(),
        matcher: Matcher::Pattern(regex),
        param_names: parsed.params,
        groups,
    })
}

/// Internal capture group name for the `index`-th parameter.
///
/// Declared names may contain `-`, which the regex engine rejects, and may
/// repeat within one template.
fn group_name(index: usize) -> String {
    format!("__param{index}")
}

fn is_param_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

struct Parser<'a> {
    pattern: &'a str,
    chars: Peekable<CharIndices<'a>>,
    /// Regex assembled so far
    expr: String,
    /// Pending literal run, escaped on flush
    literal: String,
    params: ParamNames,
    /// No parameters, wildcards or optional parts seen
    simple: bool,
    ends_with_wildcard: bool,
}

impl<'a> Parser<'a> {
    fn new(pattern: &'a str) -> Self {
        let mut expr = String::with_capacity(pattern.len() * 2 + 8);
        expr.push('^');
        Self {
            pattern,
            chars: pattern.char_indices().peekable(),
            expr,
            literal: String::with_capacity(pattern.len()),
            params: ParamNames::new(),
            simple: true,
            ends_with_wildcard: false,
        }
    }

    fn parse(mut self) -> Result<Self, PatternError> {
        while let Some((index, c)) = self.chars.next() {
            match c {
                '*' => self.wildcard(),
                '(' => self.group(index)?,
                ')' => return Err(PatternError::UnmatchedClose { index }),
                '?' => {
                    self.simple = false;
                    self.flush();
                    self.expr.push('?');
                }
                ':' => self.param(index)?,
                _ => self.literal.push(c),
            }
            self.ends_with_wildcard = c == '*';
        }
        self.flush();
        Ok(self)
    }

    fn flush(&mut self) {
        if self.literal.is_empty() {
            return;
        }
        self.expr.push_str(&regex::escape(&self.literal));
        self.literal.clear();
    }

    fn wildcard(&mut self) {
        self.flush();
        self.simple = false;
        self.expr.push_str(WILDCARD_PATTERN);
    }

    /// `(text)` stays part of the literal run; `(text)?` becomes optional.
    fn group(&mut self, open: usize) -> Result<(), PatternError> {
        let content = self.balanced(open)?;

        if self.chars.next_if(|&(_, c)| c == '?').is_some() {
            self.flush();
            self.simple = false;
            self.expr.push_str("(?:");
            self.expr.push_str(&regex::escape(content));
            self.expr.push_str(")?");
        } else {
            self.literal.push('(');
            self.literal.push_str(content);
            self.literal.push(')');
        }
        Ok(())
    }

    fn param(&mut self, colon: usize) -> Result<(), PatternError> {
        let pattern = self.pattern;
        let start = colon + 1;
        let mut end = start;
        while let Some((index, c)) = self.chars.next_if(|&(_, c)| is_param_name_char(c)) {
            end = index + c.len_utf8();
        }
        if end == start {
            return Err(PatternError::MissingParamName { index: colon });
        }
        let name = &pattern[start..end];

        let custom = match self.chars.next_if(|&(_, c)| c == '(') {
            Some((open, _)) => self.balanced(open)?,
            None => "",
        };
        let capture = if custom.is_empty() {
            DEFAULT_PARAM_PATTERN
        } else {
            custom
        };

        self.flush();
        self.simple = false;
        self.expr.push_str("(?P<");
        self.expr.push_str(&group_name(self.params.len()));
        self.expr.push('>');
        self.expr.push_str(capture);
        self.expr.push(')');
        self.params.push(Arc::from(name));
        Ok(())
    }

    /// Consume up to the `)` closing the `(` at byte offset `open` and return
    /// the text in between. Nested parentheses are kept verbatim.
    fn balanced(&mut self, open: usize) -> Result<&'a str, PatternError> {
        let pattern = self.pattern;
        let mut depth = 1usize;
        for (index, c) in self.chars.by_ref() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(&pattern[open + 1..index]);
                    }
                }
                _ => {}
            }
        }
        Err(PatternError::UnmatchedOpen { index: open })
    }
}
