//! Response composer. Maps pipeline outcomes to status codes and JSON bodies.
//!
//! Every body carries `success` and `message`. Store error detail is only echoed when
//! `expose_internal` is set (development mode).

use crate::domain::{ContactSubmission, StatusCounts, SubmissionError, UnavailableCause};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const MSG_CREATED: &str = "Message sent successfully! I'll get back to you soon.";
pub const MSG_UNAVAILABLE: &str =
    "Service temporarily unavailable. Please try again in a few moments.";
pub const MSG_CONNECTION_LOST: &str = "Unable to connect to database. Please try again later.";
pub const MSG_TIMEOUT: &str = "Request timed out. Please try again.";
pub const MSG_REJECTED: &str = "Please check your input and try again.";
pub const MSG_FAULT: &str = "Failed to send message. Please try again later.";
pub const MSG_UNAUTHORIZED: &str = "Unauthorized";

pub const ERR_CONNECTION: &str = "Database connection issue";
pub const ERR_CONNECTION_LOST: &str = "Database connection error";
pub const ERR_TIMEOUT: &str = "Operation timeout";
pub const ERR_INTERNAL: &str = "Internal server error";

#[derive(Debug, Serialize)]
struct FailureBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

fn failure_body(message: &str, error: Option<String>, errors: Option<Vec<String>>) -> FailureBody {
    FailureBody {
        success: false,
        message: message.to_string(),
        error,
        errors,
    }
}

#[derive(Debug, Serialize)]
struct CreatedBody<'a> {
    success: bool,
    message: &'static str,
    data: Receipt<'a>,
}

/// Echo of a stored submission. Never includes `message` or `status`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Receipt<'a> {
    id: &'a str,
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ListBody<'a> {
    success: bool,
    count: usize,
    data: &'a [ContactSubmission],
}

#[derive(Debug, Serialize)]
struct StatsBody {
    success: bool,
    data: StatusCounts,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseComposer {
    expose_internal: bool,
}

impl ResponseComposer {
    pub fn new(expose_internal: bool) -> Self {
        Self { expose_internal }
    }

    /// 201 with the receipt of a freshly stored submission.
    pub fn created(&self, record: &ContactSubmission) -> Response {
        let body = CreatedBody {
            success: true,
            message: MSG_CREATED,
            data: Receipt {
                id: &record.id,
                name: &record.name,
                email: &record.email,
                subject: &record.subject,
                created_at: record.created_at,
            },
        };
        (StatusCode::CREATED, Json(body)).into_response()
    }

    pub fn failure(&self, err: &SubmissionError) -> Response {
        let (status, body) = self.failure_parts(err);
        (status, Json(body)).into_response()
    }

    pub fn list(&self, records: &[ContactSubmission]) -> Response {
        let body = ListBody {
            success: true,
            count: records.len(),
            data: records,
        };
        (StatusCode::OK, Json(body)).into_response()
    }

    pub fn stats(&self, counts: StatusCounts) -> Response {
        let body = StatsBody {
            success: true,
            data: counts,
        };
        (StatusCode::OK, Json(body)).into_response()
    }

    pub fn unauthorized(&self) -> Response {
        let body = failure_body(MSG_UNAUTHORIZED, None, None);
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }

    fn failure_parts(&self, err: &SubmissionError) -> (StatusCode, FailureBody) {
        match err {
            SubmissionError::ValidationFailed(msg) => {
                (StatusCode::BAD_REQUEST, failure_body(msg.as_str(), None, None))
            }
            SubmissionError::StoreUnavailable { cause, .. } => {
                let (message, error) = match cause {
                    UnavailableCause::NotReady => (MSG_UNAVAILABLE, ERR_CONNECTION),
                    UnavailableCause::ConnectionLost => (MSG_CONNECTION_LOST, ERR_CONNECTION_LOST),
                };
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    failure_body(message, Some(error.to_string()), None),
                )
            }
            SubmissionError::StoreTimeout { .. } => (
                StatusCode::GATEWAY_TIMEOUT,
                failure_body(MSG_TIMEOUT, Some(ERR_TIMEOUT.to_string()), None),
            ),
            SubmissionError::StoreValidationRejected(errors) => (
                StatusCode::BAD_REQUEST,
                failure_body(MSG_REJECTED, None, Some(errors.clone())),
            ),
            SubmissionError::StoreFault(detail) => {
                let error = if self.expose_internal {
                    detail.clone()
                } else {
                    ERR_INTERNAL.to_string()
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    failure_body(MSG_FAULT, Some(error), None),
                )
            }
        }
    }
}
