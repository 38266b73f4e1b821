//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into `StoreError`; the store gateway maps
//! `StoreError` into `SubmissionError`. Nothing else crosses the pipeline boundary.

use thiserror::Error;

/// Outcome taxonomy of the contact pipeline. Each variant maps to exactly one HTTP status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Client input defect (missing, blank or wrongly typed fields).
    #[error("{0}")]
    ValidationFailed(String),

    /// Store cannot be reached. `cause` tells a failed readiness check (no write was
    /// attempted) from a connection lost during the call.
    #[error("store unavailable ({cause}): {detail}")]
    StoreUnavailable {
        cause: UnavailableCause,
        detail: String,
    },

    /// Store did not acknowledge within the bound. The write may still land.
    #[error("store operation timed out after {millis}ms")]
    StoreTimeout { millis: u64 },

    /// Store-side schema refused the record.
    #[error("store rejected record: {}", .0.join("; "))]
    StoreValidationRejected(Vec<String>),

    /// Any other storage failure. Detail is internal only.
    #[error("store fault: {0}")]
    StoreFault(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableCause {
    NotReady,
    ConnectionLost,
}

impl std::fmt::Display for UnavailableCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady => f.write_str("not ready"),
            Self::ConnectionLost => f.write_str("connection lost"),
        }
    }
}

/// Errors reported by store adapters through the `SubmissionStore` port.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Connection-level failure (cannot reach or open the backend).
    #[error("connection error: {0}")]
    Connection(String),

    /// Schema rejected the record; one message per offending field.
    #[error("schema rejected record: {}", .0.join("; "))]
    Rejected(Vec<String>),

    #[error("backend error: {0}")]
    Backend(String),
}
