//! Agent profiles and the explicit tool registry.
//!
//! A profile is built once from hardcoded instructions and a fixed set of
//! tools, and is never mutated afterwards. Tools are registered by name at
//! construction time; nothing is discovered at runtime.

use std::{collections::BTreeMap, fmt, sync::Arc};

use paige_contracts::agent::{OnEnter, ProfileId, SessionId};

use crate::traits::Tool;

/// What a tool hands back to the session.
pub enum ToolOutcome {
    /// Text to speak to the caller.
    Reply(String),
    /// Replace the active profile with `next` for the rest of the call,
    /// after speaking `announcement`.
    Handoff {
        next: AgentProfile,
        announcement: String,
    },
}

impl ToolOutcome {
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply(text.into())
    }
}

impl fmt::Debug for ToolOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reply(text) => f.debug_tuple("Reply").field(text).finish(),
            Self::Handoff { next, announcement } => f
                .debug_struct("Handoff")
                .field("next", &next.id)
                .field("announcement", announcement)
                .finish(),
        }
    }
}

/// Call context passed to every tool invocation.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub session_id: SessionId,
    /// Name of the room the call is bound to.
    pub room: String,
    /// The profile whose tool is being invoked.
    pub profile: ProfileId,
}

/// Name → tool mapping for one profile.
///
/// Ordered by name so that definitions handed to the model are stable
/// between runs.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.spec().name.clone();
        self.tools.insert(name, tool);
    }

    /// Builder-style `register`.
    pub fn with(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All tool definitions in OpenAI function-calling format.
    pub fn definitions(&self) -> Vec<serde_json::Value> {
        self.tools
            .values()
            .map(|tool| tool.spec().to_definition())
            .collect()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tools.keys()).finish()
    }
}

/// One assistant persona: its instructions and the tools it may call.
#[derive(Debug, Clone)]
pub struct AgentProfile {
    pub id: ProfileId,
    /// System instructions given to the language model. Immutable.
    pub instructions: String,
    pub tools: ToolRegistry,
    pub on_enter: OnEnter,
}

impl AgentProfile {
    pub fn new(id: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            id: ProfileId::new(id),
            instructions: instructions.into(),
            tools: ToolRegistry::new(),
            on_enter: OnEnter::Wait,
        }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.register(tool);
        self
    }

    pub fn on_enter(mut self, on_enter: OnEnter) -> Self {
        self.on_enter = on_enter;
        self
    }
}
