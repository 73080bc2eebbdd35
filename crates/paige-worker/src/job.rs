//! Dispatched jobs and the orchestrator seam.
//!
//! A job is one inbound call addressed to an agent name. Once the worker
//! accepts it, the entrypoint builds `SessionOptions` and a `Session` and
//! hands both to a `SessionOrchestrator`, the external runtime that owns
//! audio, turn-taking and model calls.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use paige_contracts::{
    agent::{OnEnter, Variant},
    error::PaigeResult,
    session::{NoiseCancellation, ParticipantKind, PipelineSelection},
};
use paige_core::Session;
use paige_store::InMemorySessionJournal;

use crate::{resources::ProcessResources, vad::VadModel};

/// The room a call takes place in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub name: String,
    /// How the remote caller joined.
    #[serde(default)]
    pub participant_kind: ParticipantKind,
}

/// A dispatch request from the agent server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    /// The agent name the call was addressed to.
    pub agent_name: String,
    pub room: RoomInfo,
}

/// An accepted job, ready for `entrypoint`.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub room: RoomInfo,
    pub variant: Variant,
    pub pipeline: PipelineSelection,
    pub resources: ProcessResources,
    /// Journal the call's session writes to. A clone shares the entries.
    pub journal: InMemorySessionJournal,
}

/// Everything the orchestrator needs to assemble the audio pipeline.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub pipeline: PipelineSelection,
    /// The prewarmed detector shared with every other call.
    pub vad: Arc<VadModel>,
    pub noise_cancellation: NoiseCancellation,
}

impl SessionOptions {
    pub fn for_room(
        pipeline: PipelineSelection,
        vad: Arc<VadModel>,
        room: &RoomInfo,
    ) -> Self {
        Self {
            pipeline,
            vad,
            noise_cancellation: NoiseCancellation::for_participant(room.participant_kind),
        }
    }
}

/// The external runtime that runs a call.
///
/// `start` is always called before `connect`.
pub trait SessionOrchestrator {
    /// Take ownership of the session and prepare the pipeline.
    /// `on_enter` says whether the active profile speaks first.
    fn start(&mut self, options: SessionOptions, session: Session, on_enter: OnEnter)
        -> PaigeResult<()>;

    /// Join the room. Implementations may block until the call ends.
    fn connect(&mut self, room: &RoomInfo) -> PaigeResult<()>;
}
