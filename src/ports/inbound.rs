//! Inbound port. The HTTP adapter calls into the application.

use crate::domain::{ContactSubmission, StatusCounts, SubmissionError};
use serde_json::Value;

/// Contact intake use cases.
#[async_trait::async_trait]
pub trait ContactIntakePort: Send + Sync {
    /// Validate a raw form payload and persist it.
    async fn submit(&self, payload: &Value) -> Result<ContactSubmission, SubmissionError>;

    /// Newest submissions first, capped by the service's configured list cap.
    async fn recent(&self) -> Result<Vec<ContactSubmission>, SubmissionError>;

    async fn stats(&self) -> Result<StatusCounts, SubmissionError>;
}
