//! Schema-based argument verifier.
//!
//! `SchemaArgumentVerifier` implements the `ArgumentVerifier` trait from
//! `paige-core`. The tool's `parameters` document is compiled with the
//! `jsonschema` crate and the call's arguments are validated against it.
//! All violations are collected before returning so the log shows the full
//! set in one line.
//!
//! Enumerations that need normalization (request types, for instance) are
//! deliberately left to the tools: the schema only says "string".

use tracing::{debug, warn};

use paige_contracts::{
    error::{PaigeError, PaigeResult},
    tool::{ToolArgs, ToolSpec},
};
use paige_core::traits::ArgumentVerifier;

/// Validates tool arguments against each tool's JSON Schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaArgumentVerifier;

impl SchemaArgumentVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Run the schema and return every violation message.
    ///
    /// A null schema means "no constraint". A schema that does not compile
    /// yields a single violation describing the compile error.
    pub fn violations(&self, spec: &ToolSpec, args: &ToolArgs) -> Vec<String> {
        if spec.parameters.is_null() {
            return Vec::new();
        }

        let instance = args.to_value();
        match jsonschema::validator_for(&spec.parameters) {
            Ok(validator) => validator
                .iter_errors(&instance)
                .map(|error| {
                    let path = error.instance_path.to_string();
                    if path.is_empty() {
                        error.to_string()
                    } else {
                        format!("{path}: {error}")
                    }
                })
                .collect(),
            Err(e) => {
                warn!(tool = %spec.name, error = %e, "tool parameter schema does not compile");
                vec![format!("invalid parameter schema: {e}")]
            }
        }
    }
}

impl ArgumentVerifier for SchemaArgumentVerifier {
    fn verify(&self, spec: &ToolSpec, args: &ToolArgs) -> PaigeResult<()> {
        let violations = self.violations(spec, args);

        debug!(
            tool = %spec.name,
            violation_count = violations.len(),
            "argument verification complete"
        );

        if violations.is_empty() {
            Ok(())
        } else {
            Err(PaigeError::InvalidArguments {
                tool: spec.name.clone(),
                reason: violations.join("; "),
            })
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
