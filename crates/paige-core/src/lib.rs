//! # paige-core
//!
//! Agent profiles, the explicit tool registry, and the per-call session
//! driver for the Paige dental voice agent.
//!
//! This crate provides:
//! - The seam traits (`Tool`, `ArgumentVerifier`, `AppointmentSink`, `SessionJournal`)
//! - `AgentProfile` / `ToolRegistry` / `ToolOutcome`
//! - The `Session` that dispatches tool calls and applies handoffs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paige_core::{Session, profile::AgentProfile};
//!
//! let (mut session, on_enter) = Session::start(room, profile, verifier, journal)?;
//! let outcome = session.call_tool("get_office_hours", ToolArgs::new())?;
//! ```

pub mod profile;
pub mod session;
pub mod traits;

pub use profile::{AgentProfile, RunContext, ToolOutcome, ToolRegistry};
pub use session::Session;
