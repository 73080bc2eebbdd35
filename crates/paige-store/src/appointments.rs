//! Appointment sinks.
//!
//! `CsvAppointmentFile` is the production sink: one line per record,
//! appended to a flat file shared by every session in the process (and by
//! every worker process pointed at the same path). There is no locking; a
//! single `write_all` of a short line is relied on to land in one piece.
//!
//! `InMemoryAppointmentLog` keeps the rendered lines in memory for tests and
//! dry runs.

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tracing::{debug, info};

use paige_contracts::{
    appointment::AppointmentRecord,
    error::{PaigeError, PaigeResult},
};
use paige_core::traits::AppointmentSink;

/// Appends appointment records to a flat comma-separated file.
///
/// The file is opened in create + append mode on every call so that
/// external rotation or deletion between calls is harmless.
#[derive(Debug, Clone)]
pub struct CsvAppointmentFile {
    path: PathBuf,
}

impl CsvAppointmentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AppointmentSink for CsvAppointmentFile {
    /// Append exactly one line.
    ///
    /// Open and write failures are returned as `AppointmentWriteFailed`;
    /// nothing is retried.
    fn append(&self, record: &AppointmentRecord) -> PaigeResult<()> {
        let line = record.to_line();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| PaigeError::AppointmentWriteFailed {
                reason: format!("failed to open '{}': {}", self.path.display(), e),
            })?;

        file.write_all(line.as_bytes())
            .map_err(|e| PaigeError::AppointmentWriteFailed {
                reason: format!("failed to append to '{}': {}", self.path.display(), e),
            })?;

        info!(
            path = %self.path.display(),
            request_type = record.request_type.map(|t| t.as_str()).unwrap_or("contact"),
            "appointment request recorded"
        );
        Ok(())
    }
}

/// Keeps appended lines in memory.
///
/// Cloning shares the underlying buffer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAppointmentLog {
    pub(crate) lines: Arc<Mutex<Vec<String>>>,
}

impl InMemoryAppointmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line appended so far, each including its trailing newline.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The buffer as it would appear on disk.
    pub fn contents(&self) -> String {
        self.lines().concat()
    }
}

impl AppointmentSink for InMemoryAppointmentLog {
    fn append(&self, record: &AppointmentRecord) -> PaigeResult<()> {
        let mut lines = self.lines.lock().map_err(|e| PaigeError::AppointmentWriteFailed {
            reason: format!("appointment buffer lock poisoned: {}", e),
        })?;
        lines.push(record.to_line());
        debug!(count = lines.len(), "appointment request buffered");
        Ok(())
    }
}
