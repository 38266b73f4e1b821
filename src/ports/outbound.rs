//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ConnectionState, ContactSubmission, StatusCounts, StoreError, SubmissionDraft};

/// Durable submission store. Assigns `id`, `created_at` and the default status on insert.
#[async_trait::async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Current connection state. Cheap; never touches the backend.
    fn connection_state(&self) -> ConnectionState;

    /// Persist a draft and return the stored record.
    ///
    /// Implementations check the record schema first and return `StoreError::Rejected`
    /// without writing when it fails.
    async fn insert(&self, draft: &SubmissionDraft) -> Result<ContactSubmission, StoreError>;

    /// Most recent submissions first, at most `limit` of them.
    async fn list_recent(&self, limit: u32) -> Result<Vec<ContactSubmission>, StoreError>;

    /// Count submissions grouped by status.
    async fn count_by_status(&self) -> Result<StatusCounts, StoreError>;
}

/// Authentication capability guarding admin reads.
pub trait AdminAuthorizer: Send + Sync {
    /// `credential` is the bearer token presented by the caller, if any.
    fn authorize(&self, credential: Option<&str>) -> bool;
}
