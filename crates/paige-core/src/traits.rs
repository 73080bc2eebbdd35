//! Core trait definitions for the Paige agent.
//!
//! These traits mark the seams between the agent definition and the things
//! around it:
//!
//! - `Tool`             — a callable the language model may invoke
//! - `ArgumentVerifier` — checks tool arguments before a tool runs
//! - `AppointmentSink`  — the append-only appointment store
//! - `SessionJournal`   — the per-call record of tool calls and handoffs
//!
//! `Session` wires them together for one call.

use paige_contracts::{
    appointment::AppointmentRecord,
    error::PaigeResult,
    session::SessionEvent,
    tool::{ToolArgs, ToolSpec},
};

use crate::profile::{RunContext, ToolOutcome};

/// A tool bound to an agent profile.
///
/// Tools receive arguments that have already passed schema verification.
/// Enumerated fields the schema cannot express (such as case-insensitive
/// request types) are validated by the tool itself, which answers invalid
/// values with a reply rather than an error.
pub trait Tool: Send + Sync {
    /// The model-facing contract: name, description, parameter schema.
    fn spec(&self) -> &ToolSpec;

    /// Run the tool.
    ///
    /// Returns `Err` only for faults the runtime must handle (for example a
    /// failed appointment write). Caller mistakes are answered with
    /// `ToolOutcome::Reply`.
    fn invoke(&self, ctx: &RunContext, args: &ToolArgs) -> PaigeResult<ToolOutcome>;
}

/// Verifies tool arguments against the tool's parameter schema.
///
/// Returns `Ok(())` when the arguments conform, or
/// `Err(PaigeError::InvalidArguments)` listing every violation.
pub trait ArgumentVerifier: Send + Sync {
    fn verify(&self, spec: &ToolSpec, args: &ToolArgs) -> PaigeResult<()>;
}

/// The appointment store.
///
/// Implementations must treat this as append-only: one record per call,
/// never modified or deleted.
pub trait AppointmentSink: Send + Sync {
    fn append(&self, record: &AppointmentRecord) -> PaigeResult<()>;
}

/// The per-call journal.
///
/// Every tool call — successful or not — produces exactly one event.
pub trait SessionJournal: Send + Sync {
    /// Append one event to the journal.
    fn record(&self, event: &SessionEvent) -> PaigeResult<()>;

    /// Called once when the call ends.
    fn close(&self, session_id: &str) -> PaigeResult<()>;
}

