//! Configuration schema.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields the stock dental-office agent.
//!
//! Example:
//! ```toml
//! agent_name = "my-agent"
//! variant = "handoff"
//! appointments_path = "/var/lib/paige/appointments.csv"
//!
//! [pipeline]
//! llm = { provider = "openai", model = "gpt-4o-mini" }
//! preemptive_generation = true
//!
//! [vad]
//! activation_threshold = 0.6
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use paige_contracts::{agent::Variant, session::PipelineSelection};

/// Name the worker registers under when none is configured.
pub const DEFAULT_AGENT_NAME: &str = "my-agent";

/// Appointment file used when none is configured, relative to the working
/// directory.
pub const DEFAULT_APPOINTMENTS_PATH: &str = "appointments.csv";

/// Voice-activity-detection settings, loaded once per worker process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VadSettings {
    /// Minimum speech length (seconds) before speech start is reported.
    pub min_speech_duration: f64,
    /// Silence length (seconds) after which speech end is reported.
    pub min_silence_duration: f64,
    /// Audio (seconds) kept from before detected speech start.
    pub prefix_padding_duration: f64,
    /// Upper bound (seconds) on speech buffered for one utterance.
    pub max_buffered_speech: f64,
    /// Probability above which a frame counts as speech.
    pub activation_threshold: f64,
    /// Inference sample rate in Hz; 8000 or 16000.
    pub sample_rate: u32,
    pub force_cpu: bool,
}

impl Default for VadSettings {
    fn default() -> Self {
        Self {
            min_speech_duration: 0.05,
            min_silence_duration: 0.55,
            prefix_padding_duration: 0.5,
            max_buffered_speech: 60.0,
            activation_threshold: 0.5,
            sample_rate: 16_000,
            force_cpu: true,
        }
    }
}

/// The resolved configuration of one worker process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// The fixed agent name jobs are dispatched to.
    pub agent_name: String,
    /// Which agent layout to run.
    pub variant: Variant,
    /// Flat file appointment requests are appended to.
    pub appointments_path: PathBuf,
    pub pipeline: PipelineSelection,
    pub vad: VadSettings,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            variant: Variant::default(),
            appointments_path: PathBuf::from(DEFAULT_APPOINTMENTS_PATH),
            pipeline: PipelineSelection::default(),
            vad: VadSettings::default(),
        }
    }
}
