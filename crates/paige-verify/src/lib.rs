//! # paige-verify
//!
//! Tool-argument verification for the Paige voice agent.
//!
//! This crate provides [`engine::SchemaArgumentVerifier`], which implements
//! the [`paige_core::traits::ArgumentVerifier`] trait. The arguments the
//! language model produced for a tool call are validated against that
//! tool's parameter schema before the tool runs.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use paige_verify::engine::SchemaArgumentVerifier;
//!
//! let (session, on_enter) = Session::start(
//!     room,
//!     profile,
//!     Box::new(SchemaArgumentVerifier::new()),
//!     journal,
//! )?;
//! ```

pub mod engine;

pub use engine::SchemaArgumentVerifier;
