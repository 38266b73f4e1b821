//! Submission store adapters. Implement SubmissionStore.

pub mod memory_store;
pub mod ready_state;
pub mod sqlite_store;

pub use memory_store::MemoryStore;
pub use ready_state::ReadyState;
pub use sqlite_store::SqliteStore;
