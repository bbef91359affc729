//! Upstream responses and how they translate into proxy responses.
//!
//! | upstream                          | proxy                          |
//! |-----------------------------------|--------------------------------|
//! | 2xx, body decodes                 | success, body passed through   |
//! | 404                               | 404, empty body                |
//! | other 4xx                         | 400, upstream body             |
//! | anything else, undecodable 2xx    | 500, upstream body             |
//! | no response (connect, timeout)    | 500, empty body                |

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Raw body of an upstream response, with its content type.
#[derive(Debug, Clone, Default)]
pub struct UpstreamBody {
    pub content_type: Option<HeaderValue>,
    pub bytes: Bytes,
}

impl UpstreamBody {
    fn into_response_with(self, status: StatusCode) -> Response {
        let mut response = Response::new(Body::from(self.bytes));
        *response.status_mut() = status;
        if let Some(content_type) = self.content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type);
        }
        response
    }
}

/// What came back from course-service.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub location: Option<HeaderValue>,
    pub body: UpstreamBody,
}

impl UpstreamResponse {
    pub fn new(status: StatusCode, headers: &HeaderMap, bytes: Bytes) -> Self {
        Self {
            status,
            location: headers.get(header::LOCATION).cloned(),
            body: UpstreamBody {
                content_type: headers.get(header::CONTENT_TYPE).cloned(),
                bytes,
            },
        }
    }

    /// Classify by status and decode a successful body as `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, UpstreamError> {
        let status = self.status;

        if status.is_success() {
            return serde_json::from_slice(&self.body.bytes).map_err(|source| {
                UpstreamError::MalformedBody {
                    body: self.body,
                    source,
                }
            });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound);
        }

        if status.is_client_error() {
            return Err(UpstreamError::ClientError {
                status,
                body: self.body,
            });
        }

        Err(UpstreamError::UnexpectedStatus {
            status,
            body: self.body,
        })
    }
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Course service returned 404")]
    NotFound,

    #[error("Course service rejected the request with {status}")]
    ClientError { status: StatusCode, body: UpstreamBody },

    #[error("Course service answered with {status}")]
    UnexpectedStatus { status: StatusCode, body: UpstreamBody },

    #[error("Course service returned an unreadable body: {source}")]
    MalformedBody {
        body: UpstreamBody,
        #[source]
        source: serde_json::Error,
    },

    #[error("Course service request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl UpstreamError {
    /// Metric label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            UpstreamError::NotFound => "not_found",
            UpstreamError::ClientError { .. } => "client_error",
            UpstreamError::UnexpectedStatus { .. } => "unexpected_status",
            UpstreamError::MalformedBody { .. } => "malformed_body",
            UpstreamError::Transport(_) => "transport_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::NotFound => StatusCode::NOT_FOUND,
            UpstreamError::ClientError { .. } => StatusCode::BAD_REQUEST,
            UpstreamError::UnexpectedStatus { .. }
            | UpstreamError::MalformedBody { .. }
            | UpstreamError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            UpstreamError::NotFound | UpstreamError::Transport(_) => status.into_response(),
            UpstreamError::ClientError { body, .. }
            | UpstreamError::UnexpectedStatus { body, .. }
            | UpstreamError::MalformedBody { body, .. } => body.into_response_with(status),
        }
    }
}
