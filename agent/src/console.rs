//! A text stand-in for the real-time orchestrator.
//!
//! Reads one line per turn:
//!
//!   /get_office_hours
//!   /record_appointment {"name": "Jane Doe", "phone": "555-1212", "request_type": "schedule"}
//!   hello there          (echoed as a caller turn)
//!   /quit
//!
//! No model is involved: the person at the keyboard plays the model and
//! picks which tool to call.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use paige_contracts::{
    agent::OnEnter,
    error::{PaigeError, PaigeResult},
    session::TurnOutcome,
    tool::ToolArgs,
};
use paige_core::Session;
use paige_worker::{RoomInfo, SessionOptions, SessionOrchestrator};

pub struct ConsoleOrchestrator<R, W> {
    input: R,
    output: W,
    session: Option<Session>,
    on_enter: OnEnter,
}

impl<R: BufRead, W: Write> ConsoleOrchestrator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            session: None,
            on_enter: OnEnter::Wait,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, line: impl AsRef<str>) -> PaigeResult<()> {
        writeln!(self.output, "{}", line.as_ref()).map_err(|e| PaigeError::Orchestrator {
            reason: format!("console write failed: {}", e),
        })
    }

    fn announce_profile(&mut self, session_tools: Vec<String>, on_enter: OnEnter) -> PaigeResult<()> {
        self.say(format!("  tools: {}", session_tools.join(", ")))?;
        if on_enter == OnEnter::GenerateReply {
            self.say("  (the assistant speaks first)")?;
        }
        Ok(())
    }

    /// Handle one input line. Returns `false` when the call should end.
    fn turn(&mut self, session: &mut Session, line: &str) -> PaigeResult<bool> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(true);
        }
        if line == "/quit" {
            return Ok(false);
        }
        let Some(command) = line.strip_prefix('/') else {
            return self.say(format!("caller: {line}")).map(|_| true);
        };

        let (name, raw_args) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };

        let args = match parse_args(raw_args) {
            Ok(args) => args,
            Err(reason) => {
                self.say(format!("  ! {reason}"))?;
                return Ok(true);
            }
        };

        match session.call_tool(name, args) {
            Ok(TurnOutcome::Reply { text }) => self.say(format!("paige: {text}"))?,
            Ok(TurnOutcome::Handoff {
                to,
                announcement,
                on_enter,
                ..
            }) => {
                self.say(format!("paige: {announcement}"))?;
                self.say(format!("  [now talking to {to}]"))?;
                let tools = session.active_profile().tools.names().map(str::to_string).collect();
                self.announce_profile(tools, on_enter)?;
            }
            Err(err) => {
                warn!(tool = %name, error = %err, "console tool call failed");
                self.say(format!("  ! {err}"))?;
            }
        }
        Ok(true)
    }
}

fn parse_args(raw: &str) -> Result<ToolArgs, String> {
    if raw.is_empty() {
        return Ok(ToolArgs::new());
    }
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("arguments are not valid JSON: {e}"))?;
    ToolArgs::from_value(value).map_err(|other| format!("arguments must be a JSON object, got {other}"))
}

impl<R: BufRead, W: Write> SessionOrchestrator for ConsoleOrchestrator<R, W> {
    fn start(&mut self, options: SessionOptions, session: Session, on_enter: OnEnter) -> PaigeResult<()> {
        debug!(noise_cancellation = ?options.noise_cancellation, "console session starting");
        self.say(format!(
            "session {} in room '{}' on profile '{}'",
            session.id(),
            session.room(),
            session.active_profile().id
        ))?;
        self.say(format!(
            "  pipeline: stt={} llm={} tts={} noise={:?}",
            options.pipeline.stt.provider,
            options.pipeline.llm.model.as_deref().unwrap_or(options.pipeline.llm.provider.as_str()),
            options.pipeline.tts.provider,
            options.noise_cancellation,
        ))?;
        self.session = Some(session);
        self.on_enter = on_enter;
        Ok(())
    }

    fn connect(&mut self, room: &RoomInfo) -> PaigeResult<()> {
        let mut session = self.session.take().ok_or_else(|| PaigeError::Orchestrator {
            reason: format!("connect to '{}' before start", room.name),
        })?;

        let tools = session.active_profile().tools.names().map(str::to_string).collect();
        self.announce_profile(tools, self.on_enter)?;

        let mut line = String::new();
        loop {
            line.clear();
            let read = self.input.read_line(&mut line).map_err(|e| PaigeError::Orchestrator {
                reason: format!("console read failed: {}", e),
            })?;
            if read == 0 || !self.turn(&mut session, &line)? {
                break;
            }
        }

        self.say("call ended")?;
        session.end()
    }
}
