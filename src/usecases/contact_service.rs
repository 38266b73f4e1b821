//! Contact intake use case: validate -> persist. Also serves the admin reads.

use crate::domain::{ContactSubmission, StatusCounts, SubmissionError};
use crate::ports::ContactIntakePort;
use crate::usecases::store_gateway::StoreGateway;
use crate::usecases::validator::validate_submission;
use serde_json::Value;
use tracing::debug;

/// Default cap on admin listings.
pub const DEFAULT_LIST_CAP: u32 = 50;

pub struct ContactService {
    gateway: StoreGateway,
    list_cap: u32,
}

impl ContactService {
    pub fn new(gateway: StoreGateway, list_cap: u32) -> Self {
        Self { gateway, list_cap }
    }
}

#[async_trait::async_trait]
impl ContactIntakePort for ContactService {
    async fn submit(&self, payload: &Value) -> Result<ContactSubmission, SubmissionError> {
        let draft = validate_submission(payload).inspect_err(|e| {
            debug!(reason = %e, "contact payload rejected");
        })?;
        self.gateway.persist(draft).await
    }

    async fn recent(&self) -> Result<Vec<ContactSubmission>, SubmissionError> {
        self.gateway.recent(self.list_cap).await
    }

    async fn stats(&self) -> Result<StatusCounts, SubmissionError> {
        self.gateway.status_counts().await
    }
}
