//! Error types for the Paige agent.
//!
//! All fallible operations in the workspace return `PaigeResult<T>`.
//! A caller giving an unrecognized request type is NOT an error — tools
//! answer that with a polite reply. Errors are for faults the hosting
//! runtime has to deal with.

use thiserror::Error;

/// The unified error type for the Paige workspace.
#[derive(Debug, Error)]
pub enum PaigeError {
    /// The model asked for a tool the active profile does not expose.
    #[error("tool '{name}' is not available on profile '{profile}'")]
    ToolNotFound { name: String, profile: String },

    /// The tool arguments did not match the tool's parameter schema.
    #[error("invalid arguments for tool '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// The appointment file could not be opened or appended to.
    #[error("appointment write failed: {reason}")]
    AppointmentWriteFailed { reason: String },

    /// The session journal could not record an event.
    #[error("session journal write failed: {reason}")]
    JournalWriteFailed { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A value could not be rendered as JSON or TOML.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Process prewarm (voice-activity model load) failed.
    #[error("prewarm failed: {reason}")]
    PrewarmFailed { reason: String },

    /// The worker declined a job dispatched to it.
    #[error("job rejected: {reason}")]
    JobRejected { reason: String },

    /// The external session orchestrator reported a fault.
    #[error("orchestrator error: {reason}")]
    Orchestrator { reason: String },
}

/// Convenience alias used throughout the Paige crates.
pub type PaigeResult<T> = Result<T, PaigeError>;
