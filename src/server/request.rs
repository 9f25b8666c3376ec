use http::Method;

use crate::ids::RequestId;

/// Request data handed to every handler
///
/// Built by the transport adapter from the method and raw request target. The
/// path is sanitized once on construction and is what patterns match against.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    /// Sanitized path without query string
    path: String,
    /// Request target as received
    raw_path: String,
    request_id: RequestId,
}

impl Request {
    /// Create a request with a freshly generated id
    #[must_use]
    pub fn new(method: Method, raw_path: &str) -> Self {
        Self::with_request_id(method, raw_path, RequestId::new())
    }

    #[must_use]
    pub fn with_request_id(method: Method, raw_path: &str, request_id: RequestId) -> Self {
        let path = raw_path.split(['?', '#']).next().unwrap_or_default();
        Self {
            method,
            path: sanitize_path(path),
            raw_path: raw_path.to_string(),
            request_id,
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Sanitized request path
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }
}

/// Normalize a request path before matching
///
/// - An empty path becomes `/`
/// - A missing leading `/` is added
/// - Repeated slashes collapse and `.`/`..` segments are resolved lexically;
///   `..` never climbs above the root
/// - A trailing slash present in the input is kept
///
/// # Example
///
/// ```rust
/// use routewerk::server::sanitize_path;
///
/// assert_eq!(sanitize_path("a//b/../c/"), "/a/c/");
/// assert_eq!(sanitize_path(""), "/");
/// ```
#[must_use]
pub fn sanitize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    let mut clean = String::with_capacity(path.len() + 1);
    for segment in &segments {
        clean.push('/');
        clean.push_str(segment);
    }
    if clean.is_empty() {
        clean.push('/');
    } else if path.ends_with('/') {
        clean.push('/');
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path() {
        let cases = [
            ("", "/"),
            ("/", "/"),
            ("abc", "/abc"),
            ("/abc/", "/abc/"),
            ("//abc//def", "/abc/def"),
            ("/abc/./def", "/abc/def"),
            ("/abc/../def", "/def"),
            ("/../../abc", "/abc"),
            ("/abc/..", "/"),
            ("/abc/../", "/"),
            ("/abc/def/..", "/abc"),
        ];
        for (input, expected) in cases {
            assert_eq!(sanitize_path(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_request_strips_query() {
        let req = Request::new(Method::GET, "/a//b?x=1#frag");
        assert_eq!(req.path(), "/a/b");
        assert_eq!(req.raw_path(), "/a//b?x=1#frag");
        assert_eq!(req.method(), &Method::GET);
    }
}
