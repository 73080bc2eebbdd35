//! In-memory implementation of `SessionJournal`.
//!
//! `InMemorySessionJournal` keeps all entries in a `Vec` behind a `Mutex`,
//! so the orchestrator thread and whoever exports the log can share it.
//!
//! Use `export_log()` at any time to obtain a `SessionLog` snapshot.

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use chrono::Utc;
use tracing::info;

use paige_contracts::{
    error::{PaigeError, PaigeResult},
    session::{SessionEvent, SessionEventKind},
};
use paige_core::traits::SessionJournal;

use crate::event::{JournalEntry, SessionLog};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct JournalState {
    pub(crate) entries: Vec<JournalEntry>,

    /// The next sequence number to assign (starts at 0).
    pub(crate) sequence: u64,

    /// Set by `close`; no further entries are accepted afterwards.
    pub(crate) closed_as: Option<String>,
}

// ── Public journal ────────────────────────────────────────────────────────────

/// An in-memory, append-only session journal.
///
/// Cloning shares the underlying state: keep one clone to inspect the
/// journal after handing the other to a `Session`.
#[derive(Clone)]
pub struct InMemorySessionJournal {
    label: String,
    pub(crate) state: Arc<Mutex<JournalState>>,
}

impl InMemorySessionJournal {
    /// Create a journal tagged with `label` (usually the room name).
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: Arc::new(Mutex::new(JournalState {
                entries: Vec::new(),
                sequence: 0,
                closed_as: None,
            })),
        }
    }

    /// Snapshot every entry written so far.
    pub fn export_log(&self) -> SessionLog {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        SessionLog {
            label: self.label.clone(),
            session_id: state.closed_as.clone(),
            entries: state.entries.clone(),
            exported_at: Utc::now(),
        }
    }

    /// Number of entries written so far.
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for InMemorySessionJournal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemorySessionJournal")
            .field("label", &self.label)
            .field("entries", &self.len())
            .finish()
    }
}

// ── SessionJournal impl ───────────────────────────────────────────────────────

impl SessionJournal for InMemorySessionJournal {
    /// Append one event, assigning the next sequence number.
    ///
    /// Returns `Err(JournalWriteFailed)` if the journal was already closed
    /// or the internal mutex is poisoned.
    fn record(&self, event: &SessionEvent) -> PaigeResult<()> {
        let mut state = self.state.lock().map_err(|e| PaigeError::JournalWriteFailed {
            reason: format!("journal state lock poisoned: {}", e),
        })?;

        if let Some(session_id) = &state.closed_as {
            return Err(PaigeError::JournalWriteFailed {
                reason: format!("journal for session '{}' is already closed", session_id),
            });
        }

        let sequence = state.sequence;
        state.entries.push(JournalEntry {
            sequence,
            event: event.clone(),
        });
        state.sequence += 1;

        Ok(())
    }

    /// Mark the journal closed and log a one-line summary of the call.
    ///
    /// A journal closes once; a second `close` is `JournalWriteFailed`.
    fn close(&self, session_id: &str) -> PaigeResult<()> {
        let mut state = self.state.lock().map_err(|e| PaigeError::JournalWriteFailed {
            reason: format!("journal state lock poisoned: {}", e),
        })?;
        if let Some(previous) = &state.closed_as {
            return Err(PaigeError::JournalWriteFailed {
                reason: format!("journal already closed for session '{}'", previous),
            });
        }
        state.closed_as = Some(session_id.to_string());

        let (tool_calls, handoffs, failures) =
            state
                .entries
                .iter()
                .fold((0usize, 0usize, 0usize), |(t, h, f), entry| match entry.event.kind {
                    SessionEventKind::Started { .. } => (t, h, f),
                    SessionEventKind::ToolReplied { .. } => (t + 1, h, f),
                    SessionEventKind::HandedOff { .. } => (t + 1, h + 1, f),
                    SessionEventKind::ToolFailed { .. } => (t + 1, h, f + 1),
                });

        info!(
            session_id = %session_id,
            label = %self.label,
            entry_count = state.entries.len(),
            tool_calls,
            handoffs,
            failures,
            "session journal closed"
        );

        Ok(())
    }
}
