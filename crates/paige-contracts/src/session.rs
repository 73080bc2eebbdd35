//! Per-call session types: tool-call results, journal events, and the
//! pipeline selection handed to the external orchestrator.
//!
//! `TurnOutcome` is what a session returns to the orchestrator after each
//! tool call. `SessionEvent` is what gets written to the session journal —
//! one per tool call, plus one when the session starts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::{OnEnter, ProfileId};

/// The outcome of a single tool call, as seen by the orchestrator.
///
/// - `Reply` → speak `text` back to the caller
/// - `Handoff` → speak `announcement`, then continue the call with the
///   profile `to`; if `on_enter` is `GenerateReply`, produce an opening
///   reply immediately instead of waiting for the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Reply {
        text: String,
    },
    Handoff {
        from: ProfileId,
        to: ProfileId,
        announcement: String,
        on_enter: OnEnter,
    },
}

impl TurnOutcome {
    /// The text the orchestrator should speak for this outcome.
    pub fn spoken_text(&self) -> &str {
        match self {
            Self::Reply { text } => text,
            Self::Handoff { announcement, .. } => announcement,
        }
    }
}

/// What happened in one journaled session event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEventKind {
    /// The session started on `profile`.
    Started { on_enter: OnEnter },
    /// A tool ran and produced text for the caller.
    ToolReplied {
        tool: String,
        arguments: serde_json::Value,
        reply: String,
    },
    /// A tool ran and replaced the active profile.
    HandedOff {
        tool: String,
        arguments: serde_json::Value,
        to: ProfileId,
        announcement: String,
    },
    /// A tool call was refused or failed; the reason is the error display.
    ToolFailed {
        tool: String,
        arguments: serde_json::Value,
        reason: String,
    },
}

/// An immutable record of one session event, written to the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// The profile that was active when the event happened.
    pub profile: ProfileId,
    pub kind: SessionEventKind,
    /// Wall-clock time the event was recorded (UTC).
    pub timestamp: DateTime<Utc>,
}

impl SessionEvent {
    pub fn now(profile: ProfileId, kind: SessionEventKind) -> Self {
        Self {
            profile,
            kind,
            timestamp: Utc::now(),
        }
    }
}

// ── Pipeline selection ───────────────────────────────────────────────────────

/// How a remote participant joined the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantKind {
    #[default]
    Standard,
    /// A telephony caller bridged in over SIP.
    Sip,
    Ingress,
    Egress,
    Agent,
}

/// The noise-cancellation filter applied to inbound caller audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseCancellation {
    /// Generic background voice cancellation.
    Bvc,
    /// Background voice cancellation tuned for narrowband telephony audio.
    BvcTelephony,
}

impl NoiseCancellation {
    /// Pick the filter for a participant: telephony-tuned for SIP callers,
    /// generic for everyone else.
    pub fn for_participant(kind: ParticipantKind) -> Self {
        match kind {
            ParticipantKind::Sip => Self::BvcTelephony,
            _ => Self::Bvc,
        }
    }
}

/// A provider/model pair for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSelection {
    pub provider: String,
    /// Provider-specific model name; `None` means the provider default.
    #[serde(default)]
    pub model: Option<String>,
}

impl ComponentSelection {
    pub fn provider(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: None,
        }
    }

    pub fn model(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: Some(model.into()),
        }
    }
}

/// The fixed selection of external pipeline components for a session.
///
/// The orchestrator resolves these names to real services; this workspace
/// never talks to them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSelection {
    pub stt: ComponentSelection,
    pub llm: ComponentSelection,
    pub tts: ComponentSelection,
    /// Turn-detection model name (e.g. "multilingual").
    pub turn_detection: String,
    /// Let the model start generating while end-of-turn is still pending.
    pub preemptive_generation: bool,
}

impl Default for PipelineSelection {
    fn default() -> Self {
        Self {
            stt: ComponentSelection::provider("assemblyai"),
            llm: ComponentSelection::model("openai", "gpt-4o-mini"),
            tts: ComponentSelection::provider("elevenlabs"),
            turn_detection: "multilingual".to_string(),
            preemptive_generation: true,
        }
    }
}
