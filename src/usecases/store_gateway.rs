//! Store gateway: readiness pre-check, bounded wait, error translation.
//!
//! - Refuses to touch a store that is not `Connected`
//! - Runs each store call as its own task and races it against `bound`; on expiry the
//!   caller gets `StoreTimeout` while the task keeps running (outcome unknown)
//! - Maps `StoreError` onto `SubmissionError`; no retries

use crate::domain::{
    ContactSubmission, StatusCounts, StoreError, SubmissionDraft, SubmissionError,
    UnavailableCause,
};
use crate::ports::SubmissionStore;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Default upper bound on a single store call.
pub const DEFAULT_STORE_BOUND: Duration = Duration::from_secs(10);

pub struct StoreGateway {
    store: Arc<dyn SubmissionStore>,
    bound: Duration,
}

impl StoreGateway {
    pub fn new(store: Arc<dyn SubmissionStore>, bound: Duration) -> Self {
        Self { store, bound }
    }

    /// Persist a validated draft. At most one insert is dispatched per call.
    pub async fn persist(&self, draft: SubmissionDraft) -> Result<ContactSubmission, SubmissionError> {
        self.ensure_ready()?;
        let store = Arc::clone(&self.store);
        let record = self
            .bounded("insert", async move { store.insert(&draft).await })
            .await?;
        info!(id = %record.id, "contact saved");
        Ok(record)
    }

    /// Newest-first listing, at most `limit` records.
    pub async fn recent(&self, limit: u32) -> Result<Vec<ContactSubmission>, SubmissionError> {
        self.ensure_ready()?;
        let store = Arc::clone(&self.store);
        self.bounded("list_recent", async move { store.list_recent(limit).await })
            .await
    }

    pub async fn status_counts(&self) -> Result<StatusCounts, SubmissionError> {
        self.ensure_ready()?;
        let store = Arc::clone(&self.store);
        self.bounded("count_by_status", async move { store.count_by_status().await })
            .await
    }

    fn ensure_ready(&self) -> Result<(), SubmissionError> {
        let state = self.store.connection_state();
        if state.is_ready() {
            return Ok(());
        }
        error!(%state, "store not connected; refusing operation");
        Err(SubmissionError::StoreUnavailable {
            cause: UnavailableCause::NotReady,
            detail: format!("store connection is {state}"),
        })
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, SubmissionError>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, StoreError>> + Send + 'static,
    {
        let handle = tokio::spawn(fut);
        match tokio::time::timeout(self.bound, handle).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(e))) => Err(translate(op, e)),
            Ok(Err(join_err)) => {
                error!(op, error = %join_err, "store task failed");
                Err(SubmissionError::StoreFault(join_err.to_string()))
            }
            Err(_) => {
                warn!(
                    op,
                    bound_ms = self.bound.as_millis() as u64,
                    "store call exceeded bound; outcome unknown"
                );
                Err(SubmissionError::StoreTimeout {
                    millis: self.bound.as_millis() as u64,
                })
            }
        }
    }
}

fn translate(op: &'static str, e: StoreError) -> SubmissionError {
    match e {
        StoreError::Connection(msg) => {
            error!(op, error = %msg, "store connection error");
            SubmissionError::StoreUnavailable {
                cause: UnavailableCause::ConnectionLost,
                detail: msg,
            }
        }
        StoreError::Rejected(errors) => {
            warn!(op, count = errors.len(), "store schema rejected record");
            SubmissionError::StoreValidationRejected(errors)
        }
        StoreError::Backend(msg) => {
            error!(op, error = %msg, "store backend error");
            SubmissionError::StoreFault(msg)
        }
    }
}
