//! The dental-office tools.
//!
//! Office hours and address are pure lookups. The two recording tools
//! append one line to the shared appointment sink. `appointment_requested`
//! hands the call over to the appointment assistant.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use paige_contracts::{
    appointment::{AppointmentRecord, RequestType},
    error::{PaigeError, PaigeResult},
    tool::{ToolArgs, ToolSpec},
};
use paige_core::{
    profile::{RunContext, ToolOutcome},
    traits::{AppointmentSink, Tool},
};

use crate::profiles;

pub const OFFICE_HOURS: &str = "Our office hours are Monday to Friday, 9 AM to 5 PM.";

pub const OFFICE_ADDRESS: &str = "Our office is located at 123 Four Street, FiveField, California.";

/// Spoken when the general assistant transfers the caller.
pub const TRANSFER_ANNOUNCEMENT: &str = "Let me transfer you to our appointment assistant.";

/// Spoken when `record_appointment` gets a request type it does not know.
pub const UNKNOWN_REQUEST_TYPE: &str = "I'm sorry, I can only help with scheduling, rescheduling, or canceling appointments. Could you tell me which one you need?";

fn required<'a>(tool: &str, args: &'a ToolArgs, key: &str) -> PaigeResult<&'a str> {
    args.str(key).ok_or_else(|| PaigeError::InvalidArguments {
        tool: tool.to_string(),
        reason: format!("missing string argument '{key}'"),
    })
}

fn notes(args: &ToolArgs) -> Option<String> {
    args.opt_str("notes").map(str::to_string)
}

// ── get_office_hours ─────────────────────────────────────────────────────────

pub struct GetOfficeHours {
    spec: ToolSpec,
}

impl GetOfficeHours {
    pub fn new() -> Self {
        Self {
            spec: ToolSpec::no_args(
                "get_office_hours",
                "Get the office hours of the dental office.",
            ),
        }
    }
}

impl Default for GetOfficeHours {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for GetOfficeHours {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn invoke(&self, _ctx: &RunContext, _args: &ToolArgs) -> PaigeResult<ToolOutcome> {
        Ok(ToolOutcome::reply(OFFICE_HOURS))
    }
}

// ── get_office_address ───────────────────────────────────────────────────────

pub struct GetOfficeAddress {
    spec: ToolSpec,
}

impl GetOfficeAddress {
    pub fn new() -> Self {
        Self {
            spec: ToolSpec::no_args("get_office_address", "Return the dental office address."),
        }
    }
}

impl Default for GetOfficeAddress {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for GetOfficeAddress {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn invoke(&self, _ctx: &RunContext, _args: &ToolArgs) -> PaigeResult<ToolOutcome> {
        Ok(ToolOutcome::reply(OFFICE_ADDRESS))
    }
}

// ── record_appointment_request ───────────────────────────────────────────────

/// Takes a caller's contact details for a callback (single-agent layout).
pub struct RecordAppointmentRequest {
    spec: ToolSpec,
    sink: Arc<dyn AppointmentSink>,
}

impl RecordAppointmentRequest {
    pub fn new(sink: Arc<dyn AppointmentSink>) -> Self {
        Self {
            spec: ToolSpec::with_parameters(
                "record_appointment_request",
                "Record a caller's name and phone number for appointment follow-up.",
                json!({
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "phone": { "type": "string" },
                        "notes": { "type": ["string", "null"], "default": null }
                    },
                    "required": ["name", "phone"]
                }),
            ),
            sink,
        }
    }
}

impl Tool for RecordAppointmentRequest {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn invoke(&self, ctx: &RunContext, args: &ToolArgs) -> PaigeResult<ToolOutcome> {
        let name = required(&self.spec.name, args, "name")?;
        let phone = required(&self.spec.name, args, "phone")?;

        self.sink
            .append(&AppointmentRecord::contact(name, phone, notes(args)))?;
        debug!(session_id = %ctx.session_id, "contact details stored");

        Ok(ToolOutcome::reply(format!(
            "Thank you {name}, your contact info has been recorded. Someone will call you as soon as possible."
        )))
    }
}

// ── appointment_requested ────────────────────────────────────────────────────

/// Transfers the caller from the general assistant to the appointment
/// assistant. Always succeeds and always produces the same persona.
pub struct AppointmentRequested {
    spec: ToolSpec,
    sink: Arc<dyn AppointmentSink>,
}

impl AppointmentRequested {
    /// `sink` is passed on to the appointment assistant's recording tool.
    pub fn new(sink: Arc<dyn AppointmentSink>) -> Self {
        Self {
            spec: ToolSpec::no_args(
                "appointment_requested",
                "Called when the caller wants to schedule, reschedule, or cancel an appointment.",
            ),
            sink,
        }
    }
}

impl Tool for AppointmentRequested {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn invoke(&self, _ctx: &RunContext, _args: &ToolArgs) -> PaigeResult<ToolOutcome> {
        Ok(ToolOutcome::Handoff {
            next: profiles::appointment_assistant(Arc::clone(&self.sink)),
            announcement: TRANSFER_ANNOUNCEMENT.to_string(),
        })
    }
}

// ── record_appointment ───────────────────────────────────────────────────────

/// Records a typed appointment request (handoff layout).
pub struct RecordAppointment {
    spec: ToolSpec,
    sink: Arc<dyn AppointmentSink>,
}

impl RecordAppointment {
    pub fn new(sink: Arc<dyn AppointmentSink>) -> Self {
        Self {
            spec: ToolSpec::with_parameters(
                "record_appointment",
                "Record an appointment request (schedule, reschedule, or cancel) along with the caller's name and phone number.",
                json!({
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "phone": { "type": "string" },
                        "request_type": {
                            "type": "string",
                            "description": "One of: schedule, reschedule, cancel."
                        },
                        "notes": { "type": ["string", "null"], "default": null }
                    },
                    "required": ["name", "phone", "request_type"]
                }),
            ),
            sink,
        }
    }
}

impl Tool for RecordAppointment {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn invoke(&self, ctx: &RunContext, args: &ToolArgs) -> PaigeResult<ToolOutcome> {
        let name = required(&self.spec.name, args, "name")?;
        let phone = required(&self.spec.name, args, "phone")?;
        let raw_type = required(&self.spec.name, args, "request_type")?;

        // Unknown types are the caller's mistake: answer, write nothing.
        let Some(request_type) = RequestType::parse(raw_type) else {
            info!(
                session_id = %ctx.session_id,
                request_type = %raw_type,
                "unrecognized request type"
            );
            return Ok(ToolOutcome::reply(UNKNOWN_REQUEST_TYPE));
        };

        self.sink.append(&AppointmentRecord::request(
            name,
            phone,
            request_type,
            notes(args),
        ))?;
        debug!(session_id = %ctx.session_id, %request_type, "typed request stored");

        Ok(ToolOutcome::reply(format!(
            "Thank you {name}, your {request_type} request has been recorded. Someone will call you as soon as possible."
        )))
    }
}
