use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::nasa::UpstreamError;

/// A failed proxy request. Always rendered as a 500 with a fixed message.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ProxyError {
    message: &'static str,
    details: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ProxyError {
    /// Error carrying only the fixed message
    pub fn new(message: &'static str) -> Self {
        Self { message, details: None }
    }

    /// Error carrying the fixed message plus a description of the upstream failure
    pub fn with_details(message: &'static str, source: &UpstreamError) -> Self {
        Self {
            message,
            details: Some(source.to_string()),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details.as_deref(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
