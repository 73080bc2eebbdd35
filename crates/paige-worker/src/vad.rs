//! The prewarmed voice-activity-detection model.
//!
//! Loading happens once per worker process; every session shares the same
//! instance through `ProcessResources`.

use tracing::info;

use paige_config::VadSettings;
use paige_contracts::error::{PaigeError, PaigeResult};

/// Sample rates the detector can run at.
pub const SUPPORTED_SAMPLE_RATES: [u32; 2] = [8_000, 16_000];

/// A loaded voice-activity detector.
///
/// Holds validated settings only; inference runs inside the orchestrator,
/// which reads them from here.
#[derive(Debug, Clone, PartialEq)]
pub struct VadModel {
    settings: VadSettings,
}

impl VadModel {
    /// Validate `settings` and load the model.
    ///
    /// Returns `PaigeError::PrewarmFailed` naming the first bad setting.
    pub fn load(settings: &VadSettings) -> PaigeResult<Self> {
        validate(settings)?;
        info!(
            sample_rate = settings.sample_rate,
            activation_threshold = settings.activation_threshold,
            force_cpu = settings.force_cpu,
            "VAD model loaded"
        );
        Ok(Self {
            settings: settings.clone(),
        })
    }

    pub fn settings(&self) -> &VadSettings {
        &self.settings
    }
}

fn validate(settings: &VadSettings) -> PaigeResult<()> {
    let threshold = settings.activation_threshold;
    if !(threshold > 0.0 && threshold < 1.0) {
        return Err(prewarm_failed(format!(
            "activation_threshold must be between 0 and 1, got {threshold}"
        )));
    }

    let durations = [
        ("min_speech_duration", settings.min_speech_duration),
        ("min_silence_duration", settings.min_silence_duration),
        ("prefix_padding_duration", settings.prefix_padding_duration),
        ("max_buffered_speech", settings.max_buffered_speech),
    ];
    for (field, value) in durations {
        if !value.is_finite() || value < 0.0 {
            return Err(prewarm_failed(format!(
                "{field} must be a non-negative number of seconds, got {value}"
            )));
        }
    }

    if !SUPPORTED_SAMPLE_RATES.contains(&settings.sample_rate) {
        return Err(prewarm_failed(format!(
            "sample_rate must be 8000 or 16000, got {}",
            settings.sample_rate
        )));
    }
    Ok(())
}

fn prewarm_failed(reason: String) -> PaigeError {
    PaigeError::PrewarmFailed { reason }
}
