//! # paige-store
//!
//! Append-only storage for the Paige voice agent.
//!
//! ## Overview
//!
//! - [`CsvAppointmentFile`] appends one line per appointment request to a
//!   flat file shared by every call.
//! - [`InMemoryAppointmentLog`] is the same contract without a file.
//! - [`InMemorySessionJournal`] records every tool call and handoff of a
//!   call with a monotonic sequence number.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paige_store::{CsvAppointmentFile, InMemorySessionJournal};
//! use paige_core::traits::AppointmentSink;
//!
//! let sink = CsvAppointmentFile::new("appointments.csv");
//! sink.append(&record)?;
//!
//! let journal = InMemorySessionJournal::new(room_name);
//! let log = journal.export_log();
//! ```

pub mod appointments;
pub mod event;
pub mod journal;

pub use appointments::{CsvAppointmentFile, InMemoryAppointmentLog};
pub use event::{JournalEntry, SessionLog};
pub use journal::InMemorySessionJournal;

// ── Tests ─────────────────────────────────────────────────────────────────────
