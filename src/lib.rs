//! Opswatch - supervisor-agent demo for IT operations observability
//!
//! Composes an LLM supervisor agent over synthetic telemetry tools:
//! server logs, utilization summaries, and incident digests. Ships an
//! inspector that renders the agent hierarchy and a runner that drives
//! the tree against a hosted chat-completions model.

pub mod agents;
pub mod cli;
mod config;
pub mod core;
pub mod inspect;
pub mod runner;
pub mod telemetry;
pub mod tools;
pub mod utils;

pub use agents::{create_supervisor_agent, AgentOutcome, SupervisorAgent};
pub use config::Settings;
pub use inspect::{render_agent_tree, AgentNode};
pub use runner::{Runner, RunnerError, RunnerEvent};
pub use telemetry::{
    fetch_incident_digest, fetch_server_logs, summarize_utilization, TelemetryError,
};
