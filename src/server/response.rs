use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use serde::Serialize;
use std::borrow::Cow;

/// Output side of a request, as seen by handlers
///
/// Dispatch only relies on [`has_written`](ResponseSink::has_written): once a
/// handler produced output, no further handlers run. Transport adapters
/// implement this over their own response type.
pub trait ResponseSink {
    /// Whether a status or any body bytes were produced
    fn has_written(&self) -> bool;

    /// Status set so far, if any
    fn status(&self) -> Option<StatusCode>;

    fn set_status(&mut self, status: StatusCode);

    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Append body bytes; implies `200 OK` when no status was set
    fn write(&mut self, bytes: &[u8]);
}

/// Convenience writers available on every [`ResponseSink`]
pub trait ResponseSinkExt: ResponseSink {
    fn write_str(&mut self, body: &str) {
        self.write(body.as_bytes());
    }

    /// Serialize `value` as the JSON body and set the content type
    ///
    /// # Errors
    ///
    /// Returns the serializer error; nothing is written in that case.
    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> serde_json::Result<()> {
        let body = serde_json::to_vec(value)?;
        self.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.write(&body);
        Ok(())
    }
}

impl<S: ResponseSink + ?Sized> ResponseSinkExt for S {}

/// In-memory [`ResponseSink`]
///
/// Collects status, headers and body so a transport can send them afterwards.
/// Also the sink used by tests and the benchmark.
#[derive(Debug, Default, Clone)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    #[must_use]
    pub fn body_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Convert into an `http::Response`; unwritten responses become `200 OK`
    #[must_use]
    pub fn into_http_response(self) -> http::Response<Vec<u8>> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseSink for BufferedResponse {
    fn has_written(&self) -> bool {
        self.status.is_some() || !self.body.is_empty()
    }

    fn status(&self) -> Option<StatusCode> {
        self.status
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn write(&mut self, bytes: &[u8]) {
        self.status.get_or_insert(StatusCode::OK);
        self.body.extend_from_slice(bytes);
    }
}
