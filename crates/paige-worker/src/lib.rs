//! # paige-worker
//!
//! Process bootstrap and per-call wiring for the Paige voice agent.
//!
//! ## Overview
//!
//! A worker process:
//!
//! 1. **Prewarms** once: validates and loads the VAD model and binds the
//!    shared appointment sink to its path ([`Worker::prewarm`]). The file
//!    itself is opened on each append.
//! 2. **Accepts** jobs addressed to its agent name ([`Worker::accept`]).
//! 3. Runs the **entrypoint** for each accepted job ([`entrypoint`]):
//!    builds [`SessionOptions`], starts a [`Session`] on the initial
//!    profile, hands it to a [`SessionOrchestrator`] and joins the room.
//!
//! The orchestrator is the external real-time runtime. This crate only
//! defines the seam.
//!
//! [`Session`]: paige_core::Session

pub mod job;
pub mod resources;
pub mod vad;
pub mod worker;

pub use job::{JobContext, JobRequest, RoomInfo, SessionOptions, SessionOrchestrator};
pub use resources::ProcessResources;
pub use vad::VadModel;
pub use worker::{entrypoint, Worker};

// ── Tests ─────────────────────────────────────────────────────────────────────
