//! The assistant personas and how a call starts.
//!
//! Handoff layout:
//!
//!   general-assistant ──appointment_requested──▶ appointment-assistant
//!
//! The appointment assistant is terminal for the call.

use std::sync::Arc;

use paige_contracts::agent::{OnEnter, Variant};
use paige_core::{profile::AgentProfile, traits::AppointmentSink};

use crate::{
    instructions,
    tools::{
        AppointmentRequested, GetOfficeAddress, GetOfficeHours, RecordAppointment,
        RecordAppointmentRequest,
    },
};

pub const ASSISTANT_ID: &str = "assistant";
pub const GENERAL_ASSISTANT_ID: &str = "general-assistant";
pub const APPOINTMENT_ASSISTANT_ID: &str = "appointment-assistant";

/// The single-agent assistant.
pub fn assistant(sink: Arc<dyn AppointmentSink>) -> AgentProfile {
    AgentProfile::new(ASSISTANT_ID, instructions::ASSISTANT)
        .with_tool(Arc::new(GetOfficeHours::new()))
        .with_tool(Arc::new(GetOfficeAddress::new()))
        .with_tool(Arc::new(RecordAppointmentRequest::new(sink)))
}

/// First persona of the handoff layout. Answers office questions and
/// transfers appointment requests.
pub fn general_assistant(sink: Arc<dyn AppointmentSink>) -> AgentProfile {
    AgentProfile::new(GENERAL_ASSISTANT_ID, instructions::GENERAL_ASSISTANT)
        .with_tool(Arc::new(GetOfficeHours::new()))
        .with_tool(Arc::new(GetOfficeAddress::new()))
        .with_tool(Arc::new(AppointmentRequested::new(sink)))
}

/// Second persona of the handoff layout. Speaks first on entry.
pub fn appointment_assistant(sink: Arc<dyn AppointmentSink>) -> AgentProfile {
    AgentProfile::new(APPOINTMENT_ASSISTANT_ID, instructions::APPOINTMENT_ASSISTANT)
        .with_tool(Arc::new(RecordAppointment::new(sink)))
        .on_enter(OnEnter::GenerateReply)
}

/// The persona a new call starts on.
pub fn initial_profile(variant: Variant, sink: Arc<dyn AppointmentSink>) -> AgentProfile {
    match variant {
        Variant::Single => assistant(sink),
        Variant::Handoff => general_assistant(sink),
    }
}

/// Every persona a call under `variant` can reach, in the order they are
/// entered.
pub fn profiles_for(variant: Variant, sink: Arc<dyn AppointmentSink>) -> Vec<AgentProfile> {
    match variant {
        Variant::Single => vec![assistant(sink)],
        Variant::Handoff => vec![
            general_assistant(Arc::clone(&sink)),
            appointment_assistant(sink),
        ],
    }
}
