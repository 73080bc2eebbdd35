//! Agent identity and session identity types.
//!
//! A profile is the persona the caller is currently talking to; a session is
//! one inbound call. Neither carries behaviour here — the profile's tools
//! live in paige-core.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, human-readable identifier for an agent profile.
///
/// Used in session journals, handoff reports, and log fields.
/// Example: ProfileId("appointment-assistant")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a single call session.
///
/// Every tool call and handoff recorded in the journal carries this UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Create a new, unique session ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the orchestrator should do when a profile becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnEnter {
    /// Stay silent until the caller speaks.
    Wait,
    /// Generate an opening reply right away, without waiting for user input.
    GenerateReply,
}

/// Which of the two agent layouts a worker runs.
///
/// `Single` is one assistant that records contact details itself.
/// `Handoff` starts with a general assistant that transfers appointment
/// requests to a dedicated appointment assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Single,
    Handoff,
}

impl Variant {
    /// Parse the configuration / environment spelling of a variant.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "single" => Some(Self::Single),
            "handoff" => Some(Self::Handoff),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Handoff => "handoff",
        }
    }
}
