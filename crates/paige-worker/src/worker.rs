//! Worker bootstrap and the per-call entrypoint.
//!
//! Lifecycle:
//!
//!   prewarm (once per process) → accept (per job) → entrypoint (per job)

use std::sync::Arc;

use tracing::{info, info_span, warn};

use paige_config::AgentConfig;
use paige_contracts::error::{PaigeError, PaigeResult};
use paige_core::Session;
use paige_dental::initial_profile;
use paige_store::{CsvAppointmentFile, InMemorySessionJournal};
use paige_verify::SchemaArgumentVerifier;

use crate::{
    job::{JobContext, JobRequest, SessionOptions, SessionOrchestrator},
    resources::ProcessResources,
    vad::VadModel,
};

/// A worker process registered under one agent name.
#[derive(Debug, Clone)]
pub struct Worker {
    config: AgentConfig,
    resources: ProcessResources,
}

impl Worker {
    /// Load the VAD model and bind the appointment sink to the configured
    /// path, once. No file is touched until the first append.
    pub fn prewarm(config: AgentConfig) -> PaigeResult<Self> {
        let vad = VadModel::load(&config.vad)?;
        let appointments = Arc::new(CsvAppointmentFile::new(&config.appointments_path));
        info!(
            agent_name = %config.agent_name,
            variant = config.variant.as_str(),
            appointments = %config.appointments_path.display(),
            "worker prewarmed"
        );
        Ok(Self::with_resources(config, ProcessResources::new(vad, appointments)))
    }

    /// Build a worker around resources that were prepared elsewhere.
    pub fn with_resources(config: AgentConfig, resources: ProcessResources) -> Self {
        Self { config, resources }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn resources(&self) -> &ProcessResources {
        &self.resources
    }

    /// Accept a job addressed to this worker's agent name.
    ///
    /// Returns `JobRejected` for any other name.
    pub fn accept(&self, job: JobRequest) -> PaigeResult<JobContext> {
        if job.agent_name != self.config.agent_name {
            warn!(
                expected = %self.config.agent_name,
                got = %job.agent_name,
                room = %job.room.name,
                "job rejected"
            );
            return Err(PaigeError::JobRejected {
                reason: format!(
                    "job for agent '{}' sent to worker '{}'",
                    job.agent_name, self.config.agent_name
                ),
            });
        }

        info!(room = %job.room.name, "job accepted");
        Ok(JobContext {
            journal: InMemorySessionJournal::new(job.room.name.clone()),
            room: job.room,
            variant: self.config.variant,
            pipeline: self.config.pipeline.clone(),
            resources: self.resources.clone(),
        })
    }
}

/// Run one accepted job: build the session and hand it to `orchestrator`,
/// then join the room.
///
/// Every log line emitted inside carries the room name.
pub fn entrypoint(ctx: &JobContext, orchestrator: &mut dyn SessionOrchestrator) -> PaigeResult<()> {
    let span = info_span!("session", room = %ctx.room.name);
    let _guard = span.enter();

    let options = SessionOptions::for_room(
        ctx.pipeline.clone(),
        Arc::clone(&ctx.resources.vad),
        &ctx.room,
    );
    let profile = initial_profile(ctx.variant, Arc::clone(&ctx.resources.appointments));

    let (session, on_enter) = Session::start(
        ctx.room.name.clone(),
        profile,
        Box::new(SchemaArgumentVerifier::new()),
        Box::new(ctx.journal.clone()),
    )?;

    info!(
        noise_cancellation = ?options.noise_cancellation,
        llm = %ctx.pipeline.llm.provider,
        "starting session"
    );
    orchestrator.start(options, session, on_enter)?;
    orchestrator.connect(&ctx.room)?;
    Ok(())
}
