//! # paige-config
//!
//! Configuration for the Paige voice agent.
//!
//! ## Overview
//!
//! [`AgentConfig`] is deserialized from TOML with every field defaulted,
//! then overridden from `.env.local` and `PAIGE_*` environment variables.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let config = paige_config::resolve(None)?;
//! println!("registering as {}", config.agent_name);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_env_file, resolve};
pub use schema::{AgentConfig, VadSettings};

// ── Tests ─────────────────────────────────────────────────────────────────────
