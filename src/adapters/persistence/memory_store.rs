//! In-memory submission store for development and tests.
//!
//! Same contract as the SQLite store: schema check before write, store-assigned id and
//! timestamp, newest-first listing. Data is lost on restart.

use super::ready_state::ReadyState;
use crate::domain::{
    ConnectionState, ContactSubmission, StatusCounts, StoreError, SubmissionDraft, schema,
};
use crate::ports::SubmissionStore;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

pub struct MemoryStore {
    records: RwLock<Vec<ContactSubmission>>,
    state: ReadyState,
    /// Simulated backend latency applied to every insert.
    latency: Duration,
}

impl MemoryStore {
    /// Create a connected, empty store with no latency.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            state: ReadyState::new(ConnectionState::Connected),
            latency: Duration::ZERO,
        }
    }

    /// Create a store whose inserts take `latency` before completing.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::new()
        }
    }

    pub fn set_state(&self, state: ConnectionState) {
        self.state.set(state);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SubmissionStore for MemoryStore {
    fn connection_state(&self) -> ConnectionState {
        self.state.get()
    }

    async fn insert(&self, draft: &SubmissionDraft) -> Result<ContactSubmission, StoreError> {
        let errors = schema::check_record(draft);
        if !errors.is_empty() {
            return Err(StoreError::Rejected(errors));
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let record =
            ContactSubmission::from_draft(Uuid::new_v4().to_string(), draft.clone(), Utc::now());
        self.records.write().await.push(record.clone());
        info!(id = %record.id, "[MEMORY] stored submission");
        Ok(record)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<ContactSubmission>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().rev().take(limit as usize).cloned().collect())
    }

    async fn count_by_status(&self) -> Result<StatusCounts, StoreError> {
        let records = self.records.read().await;
        let mut counts = StatusCounts::default();
        for r in records.iter() {
            counts.add(r.status, 1);
        }
        Ok(counts)
    }
}
