//! Loading configuration from TOML and the environment.
//!
//! Resolution order, later steps winning:
//!
//! 1. Built-in defaults.
//! 2. The TOML file, if one is given or `paige.toml` exists.
//! 3. `.env.local` (loaded into the process environment with `dotenvy`;
//!    variables already set in the environment are not overwritten).
//! 4. `PAIGE_*` environment variables.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use paige_contracts::{
    agent::Variant,
    error::{PaigeError, PaigeResult},
};

use crate::schema::AgentConfig;

/// Config file looked for in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "paige.toml";

/// Local environment override file loaded at startup.
pub const LOCAL_ENV_FILE: &str = ".env.local";

pub const ENV_AGENT_NAME: &str = "PAIGE_AGENT_NAME";
pub const ENV_VARIANT: &str = "PAIGE_VARIANT";
pub const ENV_APPOINTMENTS_PATH: &str = "PAIGE_APPOINTMENTS_PATH";
pub const ENV_LLM_MODEL: &str = "PAIGE_LLM_MODEL";

impl AgentConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `PaigeError::ConfigError` if the TOML is malformed, has
    /// unknown keys, or fails validation.
    pub fn from_toml_str(s: &str) -> PaigeResult<Self> {
        let config: AgentConfig = toml::from_str(s).map_err(|e| PaigeError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML.
    pub fn from_file(path: &Path) -> PaigeResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PaigeError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load the file configuration.
    ///
    /// An explicitly given path must exist. Without one, `paige.toml` in the
    /// working directory is used when present, and defaults otherwise.
    pub fn load(path: Option<&Path>) -> PaigeResult<Self> {
        match path {
            Some(path) => {
                info!(path = %path.display(), "loading config file");
                Self::from_file(path)
            }
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    info!(path = %fallback.display(), "loading config file");
                    Self::from_file(&fallback)
                } else {
                    debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply `PAIGE_*` overrides using `lookup` to read variables.
    ///
    /// Taking the lookup as a closure keeps this testable without touching
    /// the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> PaigeResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(ENV_AGENT_NAME) {
            self.agent_name = name;
        }
        if let Some(raw) = lookup(ENV_VARIANT) {
            self.variant = Variant::parse(&raw).ok_or_else(|| PaigeError::ConfigError {
                reason: format!("{ENV_VARIANT} must be 'single' or 'handoff', got '{raw}'"),
            })?;
        }
        if let Some(path) = lookup(ENV_APPOINTMENTS_PATH) {
            self.appointments_path = PathBuf::from(path);
        }
        if let Some(model) = lookup(ENV_LLM_MODEL) {
            self.pipeline.llm.model = Some(model);
        }
        self.validate()
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> PaigeResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Reject values no worker can run with.
    pub fn validate(&self) -> PaigeResult<()> {
        if self.agent_name.trim().is_empty() {
            return Err(PaigeError::ConfigError {
                reason: "agent_name must not be empty".to_string(),
            });
        }
        if self.appointments_path.as_os_str().is_empty() {
            return Err(PaigeError::ConfigError {
                reason: "appointments_path must not be empty".to_string(),
            });
        }
        if self.pipeline.llm.provider.trim().is_empty() {
            return Err(PaigeError::ConfigError {
                reason: "pipeline.llm.provider must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Load environment overrides from `path` into the process environment.
///
/// A missing file is not an error; returns whether a file was loaded.
/// A file that exists but cannot be parsed is reported as `ConfigError`.
pub fn load_env_file(path: &Path) -> PaigeResult<bool> {
    if !path.is_file() {
        debug!(path = %path.display(), "no local env file");
        return Ok(false);
    }
    dotenvy::from_path(path).map_err(|e| PaigeError::ConfigError {
        reason: format!("failed to load env file '{}': {}", path.display(), e),
    })?;
    info!(path = %path.display(), "loaded local env overrides");
    Ok(true)
}

/// The full startup sequence: `.env.local`, then the TOML file, then
/// `PAIGE_*` overrides.
pub fn resolve(config_path: Option<&Path>) -> PaigeResult<AgentConfig> {
    load_env_file(Path::new(LOCAL_ENV_FILE))?;
    let mut config = AgentConfig::load(config_path)?;
    config.apply_env()?;
    Ok(config)
}
