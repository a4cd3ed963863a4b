//! JSON envelopes for API handlers.
//!
//! Successful payloads are wrapped as `{"status": ..., "data": ...}` with an
//! optional `detail` string; errors are written as
//! `{"message": ..., "status_code": ...}` with a matching status line.

use std::error::Error as StdError;
use std::io::Write;

use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::writer::ResponseWriter;
use crate::error::ResponseError;

const APPLICATION_JSON: &str = "application/json";

/// Outcome reported in a [`JsonResponse`] envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    #[default]
    Ok,
    Error,
    Redirect,
}

/// The `{detail?, status, data}` envelope.
#[derive(Debug, Clone, Serialize)]
pub struct JsonResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub status: ResponseStatus,
    pub data: T,
}

impl<T> JsonResponse<T> {
    /// An `ok` envelope around `data`.
    pub fn new(data: T) -> Self {
        Self {
            detail: None,
            status: ResponseStatus::Ok,
            data,
        }
    }

    pub fn with_status(mut self, status: ResponseStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Writes `response` as JSON.
///
/// The payload is encoded before anything is written, so an encoding failure
/// leaves `w` untouched.
pub fn json<T: Serialize>(w: &mut ResponseWriter, response: &JsonResponse<T>) -> Result<(), ResponseError> {
    let body = serde_json::to_vec(response)?;
    w.set_content_type(APPLICATION_JSON);
    w.write_all(&body).map_err(serde_json::Error::io)?;
    Ok(())
}

/// Writes `data` in an `ok` envelope.
pub fn json_encode<T: Serialize>(w: &mut ResponseWriter, data: T) -> Result<(), ResponseError> {
    json(w, &JsonResponse::new(data))
}

/// Writes `data` in an envelope with the given status.
pub fn json_encode_with_status<T: Serialize>(
    w: &mut ResponseWriter,
    data: T,
    status: ResponseStatus,
) -> Result<(), ResponseError> {
    json(w, &JsonResponse::new(data).with_status(status))
}

/// Decodes a JSON request body.
///
/// The `Content-Type` header must be exactly `application/json`; otherwise
/// [`ResponseError::ContentType`] is returned and the body is never read.
pub fn json_decode<T, B>(req: &Request<B>) -> Result<T, ResponseError>
where
    T: DeserializeOwned,
    B: AsRef<[u8]>,
{
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    if content_type.as_deref() != Some(APPLICATION_JSON) {
        debug!(content_type = ?content_type, "rejecting non-json request body");
        return Err(ResponseError::ContentType {
            found: content_type,
        });
    }
    Ok(serde_json::from_slice(req.body().as_ref())?)
}

/// An error payload with its HTTP status code.
#[derive(Debug, Error, Serialize)]
#[error("{message}")]
pub struct JsonError {
    pub message: String,
    pub status_code: u16,
    #[serde(skip)]
    pub source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl JsonError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status_code: status.as_u16(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Writes the error body and sets the status line to `status_code`.
    pub fn write(&self, w: &mut ResponseWriter) -> Result<(), ResponseError> {
        if let Some(source) = &self.source {
            warn!(status = self.status_code, error = %source, "{}", self.message);
        }
        let body = serde_json::to_vec(self)?;
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        w.set_content_type(APPLICATION_JSON);
        w.write_header(status);
        w.write_all(&body).map_err(serde_json::Error::io)?;
        Ok(())
    }
}

/// Builds a [`JsonError`] and writes it to `w`.
pub fn json_error(
    w: &mut ResponseWriter,
    message: impl Into<String>,
    status: StatusCode,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
) -> Result<(), ResponseError> {
    let mut err = JsonError::new(message, status);
    err.source = source;
    err.write(w)
}
