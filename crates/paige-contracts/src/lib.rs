//! # paige-contracts
//!
//! Shared types, tool contracts, and errors for the Paige dental voice agent.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions, line formatting, and error types.

pub mod agent;
pub mod appointment;
pub mod error;
pub mod session;
pub mod tool;
