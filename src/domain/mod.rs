//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod schema;

pub use entities::{
    ConnectionState, ContactSubmission, StatusCounts, SubmissionDraft, SubmissionStatus,
};
pub use errors::{StoreError, SubmissionError, UnavailableCause};
