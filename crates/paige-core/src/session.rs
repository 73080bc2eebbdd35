//! The per-call session: active profile, tool dispatch, and handoff.
//!
//! Every tool call follows the same order:
//!
//!   Lookup (active profile) → Verify arguments → Invoke → Apply outcome → Journal
//!
//! A tool is never invoked unless it is bound to the profile that is active
//! at the time of the call AND its arguments passed verification. A handoff
//! replaces the active profile wholesale; there is no stack and no way back.

use std::sync::Arc;

use tracing::{debug, info, warn};

use paige_contracts::{
    agent::{OnEnter, SessionId},
    error::{PaigeError, PaigeResult},
    session::{SessionEvent, SessionEventKind, TurnOutcome},
    tool::ToolArgs,
};

use crate::{
    profile::{AgentProfile, RunContext, ToolOutcome},
    traits::{ArgumentVerifier, SessionJournal, Tool},
};

/// State for one call.
///
/// Construct with `Session::start` when a call is accepted and hand it to
/// the orchestrator. The orchestrator calls `call_tool` for every tool
/// invocation the model makes and `end` when the call is torn down.
pub struct Session {
    id: SessionId,
    room: String,
    active: AgentProfile,
    verifier: Box<dyn ArgumentVerifier>,
    journal: Box<dyn SessionJournal>,
    handoffs: u32,
}

impl Session {
    /// Start a session on `profile`.
    ///
    /// Returns the session together with the profile's on-enter directive,
    /// which tells the orchestrator whether to speak first.
    pub fn start(
        room: impl Into<String>,
        profile: AgentProfile,
        verifier: Box<dyn ArgumentVerifier>,
        journal: Box<dyn SessionJournal>,
    ) -> PaigeResult<(Self, OnEnter)> {
        let session = Self {
            id: SessionId::new(),
            room: room.into(),
            active: profile,
            verifier,
            journal,
            handoffs: 0,
        };

        let on_enter = session.active.on_enter;
        session.journal.record(&SessionEvent::now(
            session.active.id.clone(),
            SessionEventKind::Started { on_enter },
        ))?;

        info!(
            session_id = %session.id,
            room = %session.room,
            profile = %session.active.id,
            ?on_enter,
            "session started"
        );

        Ok((session, on_enter))
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// The persona currently answering the caller.
    pub fn active_profile(&self) -> &AgentProfile {
        &self.active
    }

    /// Number of handoffs that have happened in this call.
    pub fn handoff_count(&self) -> u32 {
        self.handoffs
    }

    /// Tool definitions the orchestrator should offer the model right now.
    pub fn tool_definitions(&self) -> Vec<serde_json::Value> {
        self.active.tools.definitions()
    }

    /// Run one tool call on behalf of the model.
    ///
    /// # Errors
    ///
    /// - `ToolNotFound` when the active profile has no tool called `name`
    /// - `InvalidArguments` when `args` do not match the tool's schema
    /// - whatever the tool itself returns (e.g. `AppointmentWriteFailed`)
    ///
    /// Every call is journaled, including failed ones.
    pub fn call_tool(&mut self, name: &str, args: ToolArgs) -> PaigeResult<TurnOutcome> {
        debug!(
            session_id = %self.id,
            profile = %self.active.id,
            tool = %name,
            "tool call starting"
        );

        // ── Lookup ───────────────────────────────────────────────────────────
        let tool: Arc<dyn Tool> = match self.active.tools.get(name) {
            Some(tool) => Arc::clone(tool),
            None => {
                let err = PaigeError::ToolNotFound {
                    name: name.to_string(),
                    profile: self.active.id.to_string(),
                };
                warn!(session_id = %self.id, tool = %name, "model requested unknown tool");
                return self.fail(name, &args, err);
            }
        };

        // ── Verify ───────────────────────────────────────────────────────────
        if let Err(err) = self.verifier.verify(tool.spec(), &args) {
            warn!(session_id = %self.id, tool = %name, error = %err, "tool arguments rejected");
            return self.fail(name, &args, err);
        }

        // ── Invoke ───────────────────────────────────────────────────────────
        let ctx = RunContext {
            session_id: self.id.clone(),
            room: self.room.clone(),
            profile: self.active.id.clone(),
        };
        let outcome = match tool.invoke(&ctx, &args) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(session_id = %self.id, tool = %name, error = %err, "tool failed");
                return self.fail(name, &args, err);
            }
        };

        // ── Apply + journal ──────────────────────────────────────────────────
        match outcome {
            ToolOutcome::Reply(text) => {
                self.journal_outcome(SessionEvent::now(
                    self.active.id.clone(),
                    SessionEventKind::ToolReplied {
                        tool: name.to_string(),
                        arguments: args.to_value(),
                        reply: text.clone(),
                    },
                ));
                Ok(TurnOutcome::Reply { text })
            }

            ToolOutcome::Handoff { next, announcement } => {
                let from = self.active.id.clone();
                let to = next.id.clone();
                let on_enter = next.on_enter;

                self.journal_outcome(SessionEvent::now(
                    from.clone(),
                    SessionEventKind::HandedOff {
                        tool: name.to_string(),
                        arguments: args.to_value(),
                        to: to.clone(),
                        announcement: announcement.clone(),
                    },
                ));

                self.active = next;
                self.handoffs += 1;

                info!(
                    session_id = %self.id,
                    from = %from,
                    to = %to,
                    ?on_enter,
                    "handed off to new profile"
                );

                Ok(TurnOutcome::Handoff {
                    from,
                    to,
                    announcement,
                    on_enter,
                })
            }
        }
    }

    /// Close the journal. Call once when the room disconnects.
    pub fn end(self) -> PaigeResult<()> {
        info!(
            session_id = %self.id,
            profile = %self.active.id,
            handoffs = self.handoffs,
            "session ended"
        );
        self.journal.close(&self.id.to_string())
    }

    /// Journal a failed call, then hand the original error back.
    fn fail(&self, tool: &str, args: &ToolArgs, err: PaigeError) -> PaigeResult<TurnOutcome> {
        self.journal_outcome(SessionEvent::now(
            self.active.id.clone(),
            SessionEventKind::ToolFailed {
                tool: tool.to_string(),
                arguments: args.to_value(),
                reason: err.to_string(),
            },
        ));
        Err(err)
    }

    /// Record an event for a call whose outcome is already decided.
    ///
    /// A journal failure here never replaces that outcome: the tool's side
    /// effect (an appended appointment line, say) has happened, and
    /// reporting the call as failed would make the model repeat it.
    fn journal_outcome(&self, event: SessionEvent) {
        if let Err(err) = self.journal.record(&event) {
            warn!(
                session_id = %self.id,
                profile = %event.profile,
                error = %err,
                "journal write failed; keeping tool outcome"
            );
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use paige_contracts::{
        agent::OnEnter,
        error::{PaigeError, PaigeResult},
        session::{SessionEvent, SessionEventKind, TurnOutcome},
        tool::{ToolArgs, ToolSpec},
    };

    use crate::{
        profile::{AgentProfile, RunContext, ToolOutcome},
        traits::{ArgumentVerifier, SessionJournal, Tool},
    };

    use super::Session;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// A verifier that accepts or rejects everything.
    struct MockVerifier {
        pass: bool,
    }

    impl ArgumentVerifier for MockVerifier {
        fn verify(&self, spec: &ToolSpec, _args: &ToolArgs) -> PaigeResult<()> {
            if self.pass {
                Ok(())
            } else {
                Err(PaigeError::InvalidArguments {
                    tool: spec.name.clone(),
                    reason: "\"phone\" is a required property".to_string(),
                })
            }
        }
    }

    /// A journal that records every call for later inspection.
    struct MockJournal {
        events: Arc<Mutex<Vec<SessionEvent>>>,
        closed: Arc<Mutex<Vec<String>>>,
        /// When set, every `record` fails.
        refuse: Arc<Mutex<bool>>,
    }

    impl MockJournal {
        fn new() -> Self {
            Self {
                events: Arc::new(Mutex::new(vec![])),
                closed: Arc::new(Mutex::new(vec![])),
                refuse: Arc::new(Mutex::new(false)),
            }
        }
    }

    impl SessionJournal for MockJournal {
        fn record(&self, event: &SessionEvent) -> PaigeResult<()> {
            if *self.refuse.lock().unwrap() {
                return Err(PaigeError::JournalWriteFailed {
                    reason: "journal unavailable".to_string(),
                });
            }
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        fn close(&self, session_id: &str) -> PaigeResult<()> {
            self.closed.lock().unwrap().push(session_id.to_string());
            Ok(())
        }
    }

    /// A tool that replies with fixed text and counts invocations.
    struct EchoTool {
        spec: ToolSpec,
        calls: Arc<Mutex<u32>>,
    }

    impl EchoTool {
        fn new(name: &str) -> Self {
            Self {
                spec: ToolSpec::no_args(name, "Echo for tests."),
                calls: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl Tool for EchoTool {
        fn spec(&self) -> &ToolSpec {
            &self.spec
        }

        fn invoke(&self, ctx: &RunContext, _args: &ToolArgs) -> PaigeResult<ToolOutcome> {
            *self.calls.lock().unwrap() += 1;
            Ok(ToolOutcome::reply(format!("echo from {}", ctx.profile)))
        }
    }

    /// A tool that hands off to a fresh "second" profile.
    struct HandoffTool {
        spec: ToolSpec,
    }

    impl Tool for HandoffTool {
        fn spec(&self) -> &ToolSpec {
            &self.spec
        }

        fn invoke(&self, _ctx: &RunContext, _args: &ToolArgs) -> PaigeResult<ToolOutcome> {
            let next = AgentProfile::new("second", "second instructions")
                .with_tool(Arc::new(EchoTool::new("second_only")))
                .on_enter(OnEnter::GenerateReply);
            Ok(ToolOutcome::Handoff {
                next,
                announcement: "transferring".to_string(),
            })
        }
    }

    /// A tool whose side effect always fails.
    struct FailingTool {
        spec: ToolSpec,
    }

    impl Tool for FailingTool {
        fn spec(&self) -> &ToolSpec {
            &self.spec
        }

        fn invoke(&self, _ctx: &RunContext, _args: &ToolArgs) -> PaigeResult<ToolOutcome> {
            Err(PaigeError::AppointmentWriteFailed {
                reason: "disk full".to_string(),
            })
        }
    }

    fn first_profile(echo: Arc<EchoTool>) -> AgentProfile {
        AgentProfile::new("first", "first instructions")
            .with_tool(echo)
            .with_tool(Arc::new(HandoffTool {
                spec: ToolSpec::no_args("hand_off", "Hand off for tests."),
            }))
            .with_tool(Arc::new(FailingTool {
                spec: ToolSpec::no_args("always_fails", "Fails for tests."),
            }))
    }

    fn start(verifier_pass: bool) -> (Session, Arc<EchoTool>, Arc<Mutex<Vec<SessionEvent>>>) {
        let echo = Arc::new(EchoTool::new("echo"));
        let journal = MockJournal::new();
        let events = journal.events.clone();
        let (session, on_enter) = Session::start(
            "room-1",
            first_profile(echo.clone()),
            Box::new(MockVerifier { pass: verifier_pass }),
            Box::new(journal),
        )
        .unwrap();
        assert_eq!(on_enter, OnEnter::Wait);
        (session, echo, events)
    }

    // ── Test cases ───────────────────────────────────────────────────────────

    #[test]
    fn test_start_journals_started_event() {
        let (_session, _echo, events) = start(true);
        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].kind, SessionEventKind::Started { on_enter: OnEnter::Wait }));
    }

    #[test]
    fn test_reply_tool_returns_text() {
        let (mut session, echo, events) = start(true);
        let outcome = session.call_tool("echo", ToolArgs::new()).unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::Reply {
                text: "echo from first".to_string()
            }
        );
        assert_eq!(*echo.calls.lock().unwrap(), 1);
        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_tool_is_error_and_journaled() {
        let (mut session, _echo, events) = start(true);
        let result = session.call_tool("second_only", ToolArgs::new());

        match result {
            Err(PaigeError::ToolNotFound { name, profile }) => {
                assert_eq!(name, "second_only");
                assert_eq!(profile, "first");
            }
            other => panic!("expected ToolNotFound, got {:?}", other),
        }
        let events = events.lock().unwrap();
        assert!(matches!(events.last().unwrap().kind, SessionEventKind::ToolFailed { .. }));
    }

    /// Verification failure must prevent the tool from running.
    #[test]
    fn test_invalid_arguments_block_invocation() {
        let (mut session, echo, _events) = start(false);
        let result = session.call_tool("echo", ToolArgs::new());

        assert!(matches!(result, Err(PaigeError::InvalidArguments { .. })));
        assert_eq!(*echo.calls.lock().unwrap(), 0, "tool must not run on invalid arguments");
    }

    #[test]
    fn test_handoff_replaces_active_profile() {
        let (mut session, _echo, events) = start(true);
        let outcome = session.call_tool("hand_off", ToolArgs::new()).unwrap();

        match outcome {
            TurnOutcome::Handoff { from, to, announcement, on_enter } => {
                assert_eq!(from.as_str(), "first");
                assert_eq!(to.as_str(), "second");
                assert_eq!(announcement, "transferring");
                assert_eq!(on_enter, OnEnter::GenerateReply);
            }
            other => panic!("expected Handoff, got {:?}", other),
        }

        assert_eq!(session.active_profile().id.as_str(), "second");
        assert_eq!(session.handoff_count(), 1);

        // The handoff event is attributed to the profile that made it.
        let events = events.lock().unwrap();
        let last = events.last().unwrap();
        assert_eq!(last.profile.as_str(), "first");
        assert!(matches!(last.kind, SessionEventKind::HandedOff { .. }));
    }

    /// Handoff is total replacement: the old profile's tools are gone.
    #[test]
    fn test_previous_profile_tools_unreachable_after_handoff() {
        let (mut session, echo, _events) = start(true);
        session.call_tool("hand_off", ToolArgs::new()).unwrap();

        assert!(matches!(
            session.call_tool("echo", ToolArgs::new()),
            Err(PaigeError::ToolNotFound { .. })
        ));
        assert_eq!(*echo.calls.lock().unwrap(), 0);

        let outcome = session.call_tool("second_only", ToolArgs::new()).unwrap();
        assert_eq!(outcome.spoken_text(), "echo from second");
    }

    #[test]
    fn test_tool_fault_propagates() {
        let (mut session, _echo, events) = start(true);
        let result = session.call_tool("always_fails", ToolArgs::new());

        match result {
            Err(PaigeError::AppointmentWriteFailed { reason }) => assert_eq!(reason, "disk full"),
            other => panic!("expected AppointmentWriteFailed, got {:?}", other),
        }
        // Still on the same profile; failure was journaled.
        assert_eq!(session.active_profile().id.as_str(), "first");
        let events = events.lock().unwrap();
        match &events.last().unwrap().kind {
            SessionEventKind::ToolFailed { reason, .. } => assert!(reason.contains("disk full")),
            other => panic!("expected ToolFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_end_closes_journal() {
        let echo = Arc::new(EchoTool::new("echo"));
        let journal = MockJournal::new();
        let closed = journal.closed.clone();
        let (session, _) = Session::start(
            "room-2",
            first_profile(echo),
            Box::new(MockVerifier { pass: true }),
            Box::new(journal),
        )
        .unwrap();
        let id = session.id().to_string();

        session.end().unwrap();
        assert_eq!(*closed.lock().unwrap(), vec![id]);
    }

    #[test]
    fn test_tool_definitions_follow_active_profile() {
        let (mut session, _echo, _events) = start(true);
        assert_eq!(session.tool_definitions().len(), 3);

        session.call_tool("hand_off", ToolArgs::new()).unwrap();
        let defs = session.tool_definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0]["function"]["name"], "second_only");
    }

    /// Once a tool has run, a journal failure must not turn its outcome
    /// into an error, or the model would repeat the side effect.
    #[test]
    fn test_journal_failure_keeps_tool_outcome() {
        let echo = Arc::new(EchoTool::new("echo"));
        let journal = MockJournal::new();
        let refuse = journal.refuse.clone();
        let (mut session, _) = Session::start(
            "room-3",
            first_profile(echo.clone()),
            Box::new(MockVerifier { pass: true }),
            Box::new(journal),
        )
        .unwrap();
        *refuse.lock().unwrap() = true;

        let outcome = session.call_tool("echo", ToolArgs::new()).unwrap();
        assert_eq!(outcome.spoken_text(), "echo from first");
        assert_eq!(*echo.calls.lock().unwrap(), 1);

        // A failing tool still reports its own error, not the journal's.
        match session.call_tool("always_fails", ToolArgs::new()) {
            Err(PaigeError::AppointmentWriteFailed { reason }) => assert_eq!(reason, "disk full"),
            other => panic!("expected AppointmentWriteFailed, got {:?}", other),
        }

        // Handoff still applies.
        session.call_tool("hand_off", ToolArgs::new()).unwrap();
        assert_eq!(session.active_profile().id.as_str(), "second");
    }
}
