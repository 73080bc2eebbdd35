//! # paige-dental
//!
//! The dental-office assistant: personas, instructions and tools.
//!
//! Two layouts are available, selected by [`Variant`]:
//!
//! 1. **Single** — one `assistant` answers office-hours and address
//!    questions and records the caller's contact details for a callback.
//! 2. **Handoff** — a `general-assistant` answers office questions and
//!    transfers appointment requests to an `appointment-assistant`, which
//!    records typed requests (schedule, reschedule, cancel).
//!
//! Office details are fixed strings. Nothing here talks to a real calendar.
//!
//! [`Variant`]: paige_contracts::agent::Variant

pub mod instructions;
pub mod profiles;
pub mod tools;

pub use profiles::{
    appointment_assistant, assistant, general_assistant, initial_profile, profiles_for,
};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use paige_contracts::{
        agent::{OnEnter, ProfileId, SessionId, Variant},
        appointment::AppointmentRecord,
        error::{PaigeError, PaigeResult},
        session::{SessionEventKind, TurnOutcome},
        tool::ToolArgs,
    };
    use paige_core::{
        profile::{RunContext, ToolOutcome},
        traits::{AppointmentSink, SessionJournal, Tool},
        Session,
    };
    use paige_store::{InMemoryAppointmentLog, InMemorySessionJournal};
    use paige_verify::SchemaArgumentVerifier;

    use crate::{
        profiles::{APPOINTMENT_ASSISTANT_ID, ASSISTANT_ID, GENERAL_ASSISTANT_ID},
        tools::{
            AppointmentRequested, GetOfficeAddress, GetOfficeHours, RecordAppointment,
            OFFICE_ADDRESS, OFFICE_HOURS, TRANSFER_ANNOUNCEMENT, UNKNOWN_REQUEST_TYPE,
        },
        appointment_assistant, assistant, general_assistant, initial_profile, profiles_for,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn ctx(profile: &str) -> RunContext {
        RunContext {
            session_id: SessionId::new(),
            room: "test-room".to_string(),
            profile: ProfileId::new(profile),
        }
    }

    fn reply_text(outcome: ToolOutcome) -> String {
        match outcome {
            ToolOutcome::Reply(text) => text,
            other => panic!("expected Reply, got {:?}", other),
        }
    }

    /// A sink whose writes always fail, as a full disk would.
    struct BrokenSink {
        attempts: Arc<Mutex<u32>>,
    }

    impl AppointmentSink for BrokenSink {
        fn append(&self, _record: &AppointmentRecord) -> PaigeResult<()> {
            *self.attempts.lock().unwrap() += 1;
            Err(PaigeError::AppointmentWriteFailed {
                reason: "disk full".to_string(),
            })
        }
    }

    fn start(variant: Variant, log: &InMemoryAppointmentLog) -> (Session, InMemorySessionJournal) {
        let journal = InMemorySessionJournal::new("test-room");
        let (session, _) = Session::start(
            "test-room",
            initial_profile(variant, Arc::new(log.clone())),
            Box::new(SchemaArgumentVerifier::new()),
            Box::new(journal.clone()),
        )
        .unwrap();
        (session, journal)
    }

    // ── Pure tools ────────────────────────────────────────────────────────────

    #[test]
    fn test_office_tools_return_fixed_text() {
        let hours = GetOfficeHours::new();
        let address = GetOfficeAddress::new();

        for _ in 0..3 {
            assert_eq!(
                reply_text(hours.invoke(&ctx(ASSISTANT_ID), &ToolArgs::new()).unwrap()),
                OFFICE_HOURS
            );
            assert_eq!(
                reply_text(address.invoke(&ctx(ASSISTANT_ID), &ToolArgs::new()).unwrap()),
                OFFICE_ADDRESS
            );
        }
        assert_eq!(OFFICE_HOURS, "Our office hours are Monday to Friday, 9 AM to 5 PM.");
        assert_eq!(
            OFFICE_ADDRESS,
            "Our office is located at 123 Four Street, FiveField, California."
        );
    }

    #[test]
    fn test_office_tool_descriptions() {
        assert_eq!(
            GetOfficeHours::new().spec().description,
            "Get the office hours of the dental office."
        );
        assert_eq!(
            GetOfficeAddress::new().spec().description,
            "Return the dental office address."
        );
    }

    // ── Profiles ──────────────────────────────────────────────────────────────

    #[test]
    fn test_profile_tool_bindings() {
        let sink: Arc<dyn AppointmentSink> = Arc::new(InMemoryAppointmentLog::new());

        let single = assistant(Arc::clone(&sink));
        let names: Vec<&str> = single.tools.names().collect();
        assert_eq!(
            names,
            vec!["get_office_address", "get_office_hours", "record_appointment_request"]
        );
        assert!(single.instructions.starts_with("You are Paige, a virtual dental office assistant."));
        assert_eq!(single.on_enter, OnEnter::Wait);

        let general = general_assistant(Arc::clone(&sink));
        let names: Vec<&str> = general.tools.names().collect();
        assert_eq!(
            names,
            vec!["appointment_requested", "get_office_address", "get_office_hours"]
        );
        assert_eq!(general.on_enter, OnEnter::Wait);

        let booking = appointment_assistant(sink);
        let names: Vec<&str> = booking.tools.names().collect();
        assert_eq!(names, vec!["record_appointment"]);
        assert_eq!(booking.on_enter, OnEnter::GenerateReply);
    }

    #[test]
    fn test_initial_profile_per_variant() {
        let sink: Arc<dyn AppointmentSink> = Arc::new(InMemoryAppointmentLog::new());
        assert_eq!(
            initial_profile(Variant::Single, Arc::clone(&sink)).id.as_str(),
            ASSISTANT_ID
        );
        assert_eq!(
            initial_profile(Variant::Handoff, Arc::clone(&sink)).id.as_str(),
            GENERAL_ASSISTANT_ID
        );

        let ids: Vec<String> = profiles_for(Variant::Handoff, sink)
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(ids, vec![GENERAL_ASSISTANT_ID, APPOINTMENT_ASSISTANT_ID]);
    }

    // ── Handoff ───────────────────────────────────────────────────────────────

    #[test]
    fn test_handoff_always_yields_appointment_assistant() {
        let tool = AppointmentRequested::new(Arc::new(InMemoryAppointmentLog::new()));

        for _ in 0..2 {
            match tool.invoke(&ctx(GENERAL_ASSISTANT_ID), &ToolArgs::new()).unwrap() {
                ToolOutcome::Handoff { next, announcement } => {
                    assert_eq!(next.id.as_str(), APPOINTMENT_ASSISTANT_ID);
                    assert_eq!(next.on_enter, OnEnter::GenerateReply);
                    assert_eq!(announcement, TRANSFER_ANNOUNCEMENT);
                }
                other => panic!("expected Handoff, got {:?}", other),
            }
        }
    }

    // ── Recording ─────────────────────────────────────────────────────────────

    #[test]
    fn test_record_appointment_normalizes_type() {
        let log = InMemoryAppointmentLog::new();
        let tool = RecordAppointment::new(Arc::new(log.clone()));
        let args = ToolArgs::new()
            .with("name", "Jane Doe")
            .with("phone", "555-1212")
            .with("request_type", " Schedule ");

        let text = reply_text(tool.invoke(&ctx(APPOINTMENT_ASSISTANT_ID), &args).unwrap());

        assert!(text.contains("schedule request has been recorded"), "got: {text}");
        assert!(text.starts_with("Thank you Jane Doe"));
        assert_eq!(log.contents(), "Jane Doe,555-1212,schedule,\n");
    }

    #[test]
    fn test_record_appointment_rejects_unknown_type() {
        let log = InMemoryAppointmentLog::new();
        let tool = RecordAppointment::new(Arc::new(log.clone()));
        let args = ToolArgs::new()
            .with("name", "Jane Doe")
            .with("phone", "555-1212")
            .with("request_type", "cancel please");

        let text = reply_text(tool.invoke(&ctx(APPOINTMENT_ASSISTANT_ID), &args).unwrap());

        assert_eq!(text, UNKNOWN_REQUEST_TYPE);
        assert!(log.lines().is_empty());
    }

    #[test]
    fn test_write_failure_propagates() {
        let attempts = Arc::new(Mutex::new(0));
        let tool = RecordAppointment::new(Arc::new(BrokenSink {
            attempts: Arc::clone(&attempts),
        }));
        let args = ToolArgs::new()
            .with("name", "Jane Doe")
            .with("phone", "555-1212")
            .with("request_type", "cancel");

        let result = tool.invoke(&ctx(APPOINTMENT_ASSISTANT_ID), &args);

        assert!(matches!(result, Err(PaigeError::AppointmentWriteFailed { .. })));
        assert_eq!(*attempts.lock().unwrap(), 1);
    }

    // ── Full calls ────────────────────────────────────────────────────────────

    #[test]
    fn test_single_variant_call() {
        let log = InMemoryAppointmentLog::new();
        let (mut session, journal) = start(Variant::Single, &log);

        let hours = session.call_tool("get_office_hours", ToolArgs::new()).unwrap();
        assert_eq!(hours.spoken_text(), OFFICE_HOURS);

        let args = ToolArgs::from_value(json!({
            "name": "John Smith",
            "phone": "555-9876",
            "notes": null
        }))
        .unwrap();
        let outcome = session.call_tool("record_appointment_request", args).unwrap();
        assert_eq!(
            outcome.spoken_text(),
            "Thank you John Smith, your contact info has been recorded. Someone will call you as soon as possible."
        );
        assert_eq!(log.contents(), "John Smith,555-9876,\n");

        // The single assistant cannot hand off.
        assert!(matches!(
            session.call_tool("appointment_requested", ToolArgs::new()),
            Err(PaigeError::ToolNotFound { .. })
        ));

        // Started + 2 replies + 1 failure.
        assert_eq!(journal.len(), 4);
    }

    #[test]
    fn test_handoff_variant_call() {
        let log = InMemoryAppointmentLog::new();
        let (mut session, journal) = start(Variant::Handoff, &log);

        // Recording is not available before the transfer.
        let early = ToolArgs::new()
            .with("name", "Jane Doe")
            .with("phone", "555-1212")
            .with("request_type", "schedule");
        assert!(matches!(
            session.call_tool("record_appointment", early.clone()),
            Err(PaigeError::ToolNotFound { .. })
        ));

        let outcome = session.call_tool("appointment_requested", ToolArgs::new()).unwrap();
        match &outcome {
            TurnOutcome::Handoff { from, to, on_enter, .. } => {
                assert_eq!(from.as_str(), GENERAL_ASSISTANT_ID);
                assert_eq!(to.as_str(), APPOINTMENT_ASSISTANT_ID);
                assert_eq!(*on_enter, OnEnter::GenerateReply);
            }
            other => panic!("expected Handoff, got {:?}", other),
        }
        assert_eq!(outcome.spoken_text(), TRANSFER_ANNOUNCEMENT);

        // Office tools went away with the general assistant.
        assert!(matches!(
            session.call_tool("get_office_hours", ToolArgs::new()),
            Err(PaigeError::ToolNotFound { .. })
        ));

        let outcome = session.call_tool("record_appointment", early).unwrap();
        assert!(outcome.spoken_text().contains("schedule request has been recorded"));
        assert_eq!(log.contents(), "Jane Doe,555-1212,schedule,\n");

        let kinds: Vec<&'static str> = journal
            .export_log()
            .entries
            .iter()
            .map(|e| match e.event.kind {
                SessionEventKind::Started { .. } => "started",
                SessionEventKind::ToolReplied { .. } => "replied",
                SessionEventKind::HandedOff { .. } => "handed_off",
                SessionEventKind::ToolFailed { .. } => "failed",
            })
            .collect();
        assert_eq!(kinds, vec!["started", "failed", "handed_off", "failed", "replied"]);
        assert_eq!(session.handoff_count(), 1);
    }

    #[test]
    fn test_missing_phone_never_reaches_the_sink() {
        let log = InMemoryAppointmentLog::new();
        let (mut session, _journal) = start(Variant::Single, &log);

        let result = session.call_tool(
            "record_appointment_request",
            ToolArgs::new().with("name", "Jane Doe"),
        );

        match result {
            Err(PaigeError::InvalidArguments { tool, reason }) => {
                assert_eq!(tool, "record_appointment_request");
                assert!(reason.contains("phone"), "got: {reason}");
            }
            other => panic!("expected InvalidArguments, got {:?}", other),
        }
        assert!(log.lines().is_empty());
    }

    /// A journal that stops accepting entries must not make a successful
    /// write look failed; a retry would append the same request twice.
    #[test]
    fn test_closed_journal_still_reports_recorded_request() {
        let log = InMemoryAppointmentLog::new();
        let (mut session, journal) = start(Variant::Single, &log);
        journal.close("ended-elsewhere").unwrap();

        let outcome = session
            .call_tool(
                "record_appointment_request",
                ToolArgs::new().with("name", "Jane").with("phone", "1"),
            )
            .unwrap();

        assert_eq!(
            outcome.spoken_text(),
            "Thank you Jane, your contact info has been recorded. Someone will call you as soon as possible."
        );
        assert_eq!(log.lines(), vec!["Jane,1,\n"]);
    }

    #[test]
    fn test_closed_journal_still_reports_typed_request() {
        let log = InMemoryAppointmentLog::new();
        let (mut session, journal) = start(Variant::Handoff, &log);
        session.call_tool("appointment_requested", ToolArgs::new()).unwrap();
        journal.close("ended-elsewhere").unwrap();

        let outcome = session
            .call_tool(
                "record_appointment",
                ToolArgs::new()
                    .with("name", "Jane Doe")
                    .with("phone", "555-1212")
                    .with("request_type", "cancel"),
            )
            .unwrap();

        assert!(outcome.spoken_text().contains("cancel request has been recorded"));
        assert_eq!(log.lines(), vec!["Jane Doe,555-1212,cancel,\n"]);
    }
}
