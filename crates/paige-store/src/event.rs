//! Journal entry and export types.
//!
//! `JournalEntry` wraps a `SessionEvent` with its position in the session's
//! journal. `SessionLog` is the snapshot produced when a session's journal
//! is exported.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use paige_contracts::session::SessionEvent;

/// A single numbered entry in a session journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Monotonically increasing position in the journal, starting at 0.
    pub sequence: u64,

    pub event: SessionEvent,
}

/// A snapshot of one session's journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLog {
    /// Label the journal was created with (usually the room name).
    pub label: String,

    /// The session id passed to `close`; `None` while the call is live.
    pub session_id: Option<String>,

    /// All entries in append order (sequence 0 first).
    pub entries: Vec<JournalEntry>,

    /// Wall-clock time (UTC) the snapshot was taken.
    pub exported_at: DateTime<Utc>,
}
