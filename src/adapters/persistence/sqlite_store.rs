//! SQLite-backed submission store via libsql. Implements SubmissionStore.
//!
//! One `contacts` table in data/contacts.db. Required-field and status rules are repeated as
//! named CHECK constraints so a record that slips past the schema check is still refused.
//! Timestamps are stored as fixed-width RFC 3339 text so lexical order is time order.

use super::ready_state::ReadyState;
use crate::domain::{
    ConnectionState, ContactSubmission, StatusCounts, StoreError, SubmissionDraft,
    SubmissionStatus, schema,
};
use crate::ports::SubmissionStore;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use libsql::{Connection, Database, params};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

const CONTACTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL CONSTRAINT name_required CHECK (length(trim(name)) > 0),
    email TEXT NOT NULL CONSTRAINT email_required CHECK (length(trim(email)) > 0),
    subject TEXT NOT NULL CONSTRAINT subject_required CHECK (length(trim(subject)) > 0),
    message TEXT NOT NULL CONSTRAINT message_required CHECK (length(trim(message)) > 0),
    status TEXT NOT NULL DEFAULT 'unread'
        CONSTRAINT status_valid CHECK (status IN ('unread', 'read', 'replied')),
    created_at TEXT NOT NULL
)"#;
const CONTACTS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_contacts_created_at ON contacts (created_at DESC)";

/// SQLite store. Holds one connection shared by all requests; safe to share via Arc.
pub struct SqliteStore {
    // Kept alive for the lifetime of `conn`.
    _db: Database,
    conn: Connection,
    db_path: Option<PathBuf>,
    state: ReadyState,
}

impl SqliteStore {
    /// Connect to (or create) data/contacts.db under `base_dir` and ensure the schema exists.
    ///
    /// Sets WAL mode and synchronous=NORMAL.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base = base_dir.as_ref();
        tokio::fs::create_dir_all(base)
            .await
            .map_err(|e| StoreError::Connection(format!("create data dir: {}", e)))?;
        let db_path = base.join("contacts.db");
        let store = Self::open(&db_path.to_string_lossy(), Some(db_path.clone())).await?;

        let abs_path = db_path.canonicalize().unwrap_or(db_path);
        info!(path = %abs_path.display(), "SQLite connected with WAL mode");
        Ok(store)
    }

    /// Private in-memory database. Nothing survives the store.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        Self::open(":memory:", None).await
    }

    async fn open(location: &str, db_path: Option<PathBuf>) -> Result<Self, StoreError> {
        let state = ReadyState::new(ConnectionState::Connecting);
        let db = libsql::Builder::new_local(location)
            .build()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        // PRAGMA returns a row; consume it (execute fails when rows are returned).
        for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
            let mut rows = conn
                .query(pragma, ())
                .await
                .map_err(|e| StoreError::Connection(format!("{pragma} failed: {}", e)))?;
            while rows.next().await.map_err(classify)?.is_some() {}
        }

        conn.execute(CONTACTS_TABLE, ()).await.map_err(classify)?;
        conn.execute(CONTACTS_INDEX, ()).await.map_err(classify)?;

        state.set(ConnectionState::Connected);
        Ok(Self {
            _db: db,
            conn,
            db_path,
            state,
        })
    }

    /// Stop accepting operations. Requests arriving afterwards see a not-ready store.
    pub fn close(&self) {
        self.state.set(ConnectionState::Disconnecting);
        let location = self
            .db_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ":memory:".to_string());
        info!(path = %location, "SQLite store closed");
        self.state.set(ConnectionState::Disconnected);
    }

    fn row_to_record(row: &libsql::Row) -> Result<ContactSubmission, StoreError> {
        let status: String = row.get(5).map_err(classify)?;
        let created_at: String = row.get(6).map_err(classify)?;
        Ok(ContactSubmission {
            id: row.get(0).map_err(classify)?,
            name: row.get(1).map_err(classify)?,
            email: row.get(2).map_err(classify)?,
            subject: row.get(3).map_err(classify)?,
            message: row.get(4).map_err(classify)?,
            status: SubmissionStatus::parse(&status)
                .ok_or_else(|| StoreError::Backend(format!("unknown status {status:?}")))?,
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

#[async_trait::async_trait]
impl SubmissionStore for SqliteStore {
    fn connection_state(&self) -> ConnectionState {
        self.state.get()
    }

    async fn insert(&self, draft: &SubmissionDraft) -> Result<ContactSubmission, StoreError> {
        let errors = schema::check_record(draft);
        if !errors.is_empty() {
            return Err(StoreError::Rejected(errors));
        }

        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().trunc_subsecs(6);
        self.conn
            .execute(
                r#"
                INSERT INTO contacts (id, name, email, subject, message, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    id.as_str(),
                    draft.name.as_str(),
                    draft.email.as_str(),
                    draft.subject.as_str(),
                    draft.message.as_str(),
                    format_timestamp(&created_at)
                ],
            )
            .await
            .map_err(classify)?;

        Ok(ContactSubmission::from_draft(id, draft.clone(), created_at))
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<ContactSubmission>, StoreError> {
        let mut rows = self
            .conn
            .query(
                r#"
                SELECT id, name, email, subject, message, status, created_at
                FROM contacts
                ORDER BY created_at DESC, rowid DESC
                LIMIT ?1
                "#,
                params![limit as i64],
            )
            .await
            .map_err(classify)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await.map_err(classify)? {
            records.push(Self::row_to_record(&row)?);
        }
        Ok(records)
    }

    async fn count_by_status(&self) -> Result<StatusCounts, StoreError> {
        let mut rows = self
            .conn
            .query("SELECT status, COUNT(*) FROM contacts GROUP BY status", ())
            .await
            .map_err(classify)?;
        let mut counts = StatusCounts::default();
        while let Some(row) = rows.next().await.map_err(classify)? {
            let status: String = row.get(0).map_err(classify)?;
            let n: i64 = row.get(1).map_err(classify)?;
            match SubmissionStatus::parse(&status) {
                Some(s) => counts.add(s, n.max(0) as u64),
                None => warn!(status = %status, "ignoring rows with unknown status"),
            }
        }
        Ok(counts)
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| StoreError::Backend(format!("bad created_at {s:?}: {}", e)))
}

/// Map a libsql error onto the store port's error kinds.
fn classify(e: libsql::Error) -> StoreError {
    let msg = e.to_string();
    if msg.contains("constraint failed") {
        return StoreError::Rejected(vec![constraint_message(&msg)]);
    }
    let lower = msg.to_lowercase();
    if lower.contains("unable to open")
        || lower.contains("database is locked")
        || lower.contains("connection")
    {
        return StoreError::Connection(msg);
    }
    StoreError::Backend(msg)
}

fn constraint_message(msg: &str) -> String {
    let field = [
        ("name_required", "Name is required"),
        ("email_required", "Email is required"),
        ("subject_required", "Subject is required"),
        ("message_required", "Message is required"),
        ("status_valid", "Status is not a valid value"),
    ]
    .into_iter()
    .find(|(constraint, _)| msg.contains(constraint));
    match field {
        Some((_, text)) => text.to_string(),
        None => "Record failed store validation".to_string(),
    }
}
