//! Buffered HTTP response sink.

use std::io;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// A response sink with write-once status and headers.
///
/// Handlers write into it the way they would into a streaming response:
/// headers first, then body bytes. The first call to
/// [`write_header`](Self::write_header), or the first body write, commits the
/// status and a snapshot of the headers. Header changes after that point do
/// not reach the final response.
///
/// The body is buffered, so a failed render can still be replaced by an
/// error page through [`error`](Self::error).
///
/// ```rust
/// use std::io::Write;
/// use axum::http::StatusCode;
/// use pagekit::ResponseWriter;
///
/// let mut w = ResponseWriter::new();
/// w.headers_mut().insert("x-page", "home".parse().unwrap());
/// write!(w, "<h1>Home</h1>").unwrap();
///
/// assert_eq!(w.status(), StatusCode::OK);
/// assert_eq!(w.body_str(), Some("<h1>Home</h1>"));
/// ```
#[derive(Debug, Default)]
pub struct ResponseWriter {
    headers: HeaderMap,
    committed: Option<(StatusCode, HeaderMap)>,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Headers of the response; editable until the response is committed.
    pub fn headers(&self) -> &HeaderMap {
        match &self.committed {
            Some((_, headers)) => headers,
            None => &self.headers,
        }
    }

    /// Mutable access to the pending headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Sets the `Content-Type` header.
    pub fn set_content_type(&mut self, value: &'static str) {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(value));
    }

    /// Commits the status line and headers. Later calls are ignored.
    pub fn write_header(&mut self, status: StatusCode) {
        if let Some((existing, _)) = &self.committed {
            warn!(
                status = status.as_u16(),
                committed = existing.as_u16(),
                "superfluous write_header call ignored"
            );
            return;
        }
        self.committed = Some((status, self.headers.clone()));
    }

    /// Returns true once the status line has been written.
    pub fn is_committed(&self) -> bool {
        self.committed.is_some()
    }

    /// The committed status, or 200 if nothing was committed yet.
    pub fn status(&self) -> StatusCode {
        self.committed
            .as_ref()
            .map(|(status, _)| *status)
            .unwrap_or(StatusCode::OK)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as UTF-8, if it is valid UTF-8.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Replaces the response with a plain-text error.
    ///
    /// Any buffered body and commitment are discarded, so an error raised in
    /// the middle of rendering never leaks a half-written page.
    pub fn error(&mut self, status: StatusCode, message: &str) {
        self.body.clear();
        self.committed = None;
        self.headers.remove(CONTENT_TYPE);
        self.set_content_type("text/plain; charset=utf-8");
        self.headers
            .insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        self.write_header(status);
        self.body.extend_from_slice(message.as_bytes());
        self.body.push(b'\n');
    }
}

impl io::Write for ResponseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.committed.is_none() {
            self.write_header(StatusCode::OK);
        }
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl IntoResponse for ResponseWriter {
    fn into_response(self) -> Response {
        let (status, headers) = self
            .committed
            .unwrap_or((StatusCode::OK, self.headers));
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_first_write_commits_ok() {
        let mut w = ResponseWriter::new();
        assert!(!w.is_committed());
        w.write_all(b"hi").unwrap();
        assert!(w.is_committed());
        assert_eq!(w.status(), StatusCode::OK);
        assert_eq!(w.body(), b"hi");
    }

    #[test]
    fn test_write_header_is_write_once() {
        let mut w = ResponseWriter::new();
        w.write_header(StatusCode::CREATED);
        w.write_header(StatusCode::NOT_FOUND);
        assert_eq!(w.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_headers_after_commit_are_ignored() {
        let mut w = ResponseWriter::new();
        w.set_content_type("text/html");
        w.write_all(b"<p>").unwrap();
        w.set_content_type("application/json");

        assert_eq!(w.headers()[CONTENT_TYPE], "text/html");
        let response = w.into_response();
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
    }

    #[test]
    fn test_error_replaces_partial_output() {
        let mut w = ResponseWriter::new();
        w.set_content_type("text/html");
        w.write_all(b"<html><body>half").unwrap();

        w.error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(w.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(w.body_str(), Some("boom\n"));
        assert_eq!(w.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(w.headers()[X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[test]
    fn test_into_response_uncommitted_defaults() {
        let mut w = ResponseWriter::new();
        w.headers_mut()
            .insert("x-trace", HeaderValue::from_static("1"));
        let response = w.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-trace"], "1");
    }
}
