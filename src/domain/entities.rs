//! Domain entities. Pure data structures for the core business.
//!
//! No storage/HTTP types here. Adapters map into these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated, not-yet-persisted contact-form entry. All fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A persisted contact-form entry. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// Build the stored record for a draft. Only stores call this.
    pub fn from_draft(id: String, draft: SubmissionDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            subject: draft.subject,
            message: draft.message,
            status: SubmissionStatus::default(),
            created_at,
        }
    }
}

/// Read state of a submission. Changed only by admin tooling, never by intake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Unread,
    Read,
    Replied,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Unread => "unread",
            SubmissionStatus::Read => "read",
            SubmissionStatus::Replied => "replied",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unread" => Some(SubmissionStatus::Unread),
            "read" => Some(SubmissionStatus::Read),
            "replied" => Some(SubmissionStatus::Replied),
            _ => None,
        }
    }
}

/// Store connection lifecycle. Only `Connected` accepts operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Connecting,
    Disconnecting,
}

impl ConnectionState {
    pub fn is_ready(self) -> bool {
        self == ConnectionState::Connected
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connected => "connected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Disconnecting => "disconnecting",
        };
        f.write_str(s)
    }
}

/// Submission counts per status, for admin stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: u64,
    pub unread: u64,
    pub read: u64,
    pub replied: u64,
}

impl StatusCounts {
    /// Add `n` records of `status`, keeping `total` in step.
    pub fn add(&mut self, status: SubmissionStatus, n: u64) {
        match status {
            SubmissionStatus::Unread => self.unread += n,
            SubmissionStatus::Read => self.read += n,
            SubmissionStatus::Replied => self.replied += n,
        }
        self.total += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_draft_defaults_to_unread() {
        let draft = SubmissionDraft {
            name: "Ann".into(),
            email: "a@b.com".into(),
            subject: "Hi".into(),
            message: "Hello there".into(),
        };
        let record = ContactSubmission::from_draft("id-1".into(), draft, Utc::now());
        assert_eq!(record.status, SubmissionStatus::Unread);
        assert_eq!(record.name, "Ann");
    }

    #[test]
    fn test_record_serializes_created_at_camel_case() {
        let draft = SubmissionDraft {
            name: "Ann".into(),
            email: "a@b.com".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
        };
        let record = ContactSubmission::from_draft("id-1".into(), draft, Utc::now());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "unread");
    }

    #[test]
    fn test_status_round_trip_names() {
        for s in [
            SubmissionStatus::Unread,
            SubmissionStatus::Read,
            SubmissionStatus::Replied,
        ] {
            assert_eq!(SubmissionStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(SubmissionStatus::parse("archived"), None);
    }

    #[test]
    fn test_only_connected_is_ready() {
        assert!(ConnectionState::Connected.is_ready());
        assert!(!ConnectionState::Connecting.is_ready());
        assert!(!ConnectionState::Disconnecting.is_ready());
        assert!(!ConnectionState::Disconnected.is_ready());
    }
}
