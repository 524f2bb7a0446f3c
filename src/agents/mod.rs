//! Agent layer: specialized tool-calling agents and the supervisor that
//! orchestrates them.

pub mod factory;
pub mod specialized;
pub mod supervisor;

pub use factory::{create_supervisor_agent, create_supervisor_agent_with_client};
pub use specialized::{SpecializedAgent, SpecializedAgentConfig};
pub use supervisor::SupervisorAgent;

/// One reasoning step taken by an agent.
#[derive(Debug, Clone)]
pub struct AgentStep {
    pub iteration: usize,
    pub thought: String,
    pub action: Option<String>,
    pub observation: Option<String>,
}

/// Terminal result of an agent run. Transport-level LLM errors are not
/// folded in here; they propagate as `LlmError` so callers can tell quota
/// exhaustion apart from a task the agent could not finish.
#[derive(Debug)]
pub enum AgentOutcome {
    Success {
        result: String,
        steps: Vec<AgentStep>,
    },
    Failure {
        error: String,
        steps: Vec<AgentStep>,
    },
}

impl AgentOutcome {
    pub fn steps(&self) -> &[AgentStep] {
        match self {
            AgentOutcome::Success { steps, .. } => steps,
            AgentOutcome::Failure { steps, .. } => steps,
        }
    }
}
