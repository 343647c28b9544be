//! Uniform response envelope
//!
//! Every response this service produces, success or failure, is the same
//! JSON shape: `{data, meta: {status, error, previous, next, total}}` with
//! absent fields omitted. Errors carry no `data`; the status in `meta`
//! always matches the HTTP status line.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::DomainError;

const CONTENT_TYPE_JSON_UTF8: &str = "application/json; charset=utf-8";

/// Meta block carried by every envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

impl Meta {
    fn ok(status: StatusCode) -> Self {
        Self {
            status: status.as_u16(),
            error: None,
            previous: None,
            next: None,
            total: None,
        }
    }
}

/// Successful response envelope wrapping a serializable value.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub meta: Meta,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap a value with the default 200 status.
    pub fn new(data: T) -> Self {
        Self {
            data: Some(data),
            meta: Meta::ok(StatusCode::OK),
        }
    }

    /// Override the status, e.g. 201 for creations.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.meta.status = status.as_u16();
        self
    }

    /// Attach the collection size. A zero total is omitted from the body.
    pub fn with_total(mut self, total: i64) -> Self {
        self.meta.total = if total == 0 { None } else { Some(total) };
        self
    }

    /// Attach the previous-page link.
    pub fn with_previous(mut self, link: impl Into<String>) -> Self {
        self.meta.previous = Some(link.into());
        self
    }

    /// Attach the next-page link.
    pub fn with_next(mut self, link: impl Into<String>) -> Self {
        self.meta.next = Some(link.into());
        self
    }
}

fn json_response(status: StatusCode, body: &impl Serialize) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static(CONTENT_TYPE_JSON_UTF8),
            )],
            bytes,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("response encoding failed: {}", e),
        )
            .into_response(),
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.meta.status).unwrap_or(StatusCode::OK);
        json_response(status, &self)
    }
}

/// A classified domain error ready to be rendered as an envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

/// Map a domain error to its transport status.
///
/// Matches on the root cause by variant identity; contextual wrapping never
/// changes the outcome. Anything outside the sentinel set is a 500 and its
/// message is exposed as-is.
pub fn status_for(err: &DomainError) -> StatusCode {
    match err.root_cause() {
        DomainError::UserNotFound => StatusCode::NOT_FOUND,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::InvalidPassword
        | DomainError::InvalidResetKey
        | DomainError::MissingField { .. }
        | DomainError::PasswordMismatch => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self {
            status: status_for(&err),
            // The full (wrapped) message, not just the root cause
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope::<()> {
            data: None,
            meta: Meta {
                status: self.status.as_u16(),
                error: Some(self.message),
                previous: None,
                next: None,
                total: None,
            },
        };

        json_response(self.status, &body)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}
