//! Factory for the production observability agent tree.

use crate::agents::specialized::{SpecializedAgent, SpecializedAgentConfig};
use crate::agents::supervisor::SupervisorAgent;
use crate::config::Settings;
use crate::core::llm::LLMClient;
use crate::tools::{
    incidents::FetchIncidentDigestTool, logs::FetchServerLogsTool,
    metrics::SummarizeUtilizationTool,
};
use std::sync::Arc;

/// Build the IT observability supervisor with its three sub-agents.
pub fn create_supervisor_agent(settings: &Settings, api_key: String) -> SupervisorAgent {
    create_supervisor_agent_with_client(settings, LLMClient::new(api_key, settings.clone()))
}

/// Same tree, but with a caller-supplied client (tests point this at a
/// mock chat endpoint).
pub fn create_supervisor_agent_with_client(
    settings: &Settings,
    llm_client: LLMClient,
) -> SupervisorAgent {
    let log_investigator = SpecializedAgent::with_client(
        SpecializedAgentConfig {
            name: "log_investigator".to_string(),
            description: "Pulls raw server logs for a host over a minute window and \
                          surfaces anomalies such as latency spikes, disk pressure, \
                          and database errors."
                .to_string(),
            system_prompt: "You are a log analysis specialist. Fetch logs for the \
                            requested server and window, then report notable WARN and \
                            ERROR lines with a short interpretation of each."
                .to_string(),
            tools: vec![Arc::new(FetchServerLogsTool::new())],
        },
        llm_client.clone(),
    );

    let metrics_analyst = SpecializedAgent::with_client(
        SpecializedAgentConfig {
            name: "metrics_analyst".to_string(),
            description: "Summarizes fleet CPU, memory, and disk utilization over an \
                          hour lookback, including recent samples."
                .to_string(),
            system_prompt: "You are a capacity and utilization specialist. Summarize \
                            utilization for the requested lookback and call out any \
                            figure that implies saturation risk."
                .to_string(),
            tools: vec![Arc::new(SummarizeUtilizationTool::new())],
        },
        llm_client.clone(),
    );

    let incident_reporter = SpecializedAgent::with_client(
        SpecializedAgentConfig {
            name: "incident_reporter".to_string(),
            description: "Retrieves the digest of the most relevant incident ticket: \
                          severity, affected systems, and narrative."
                .to_string(),
            system_prompt: "You are an incident communication specialist. Fetch the \
                            incident digest and restate it for a leadership audience: \
                            impact, current state, and residual risk."
                .to_string(),
            tools: vec![Arc::new(FetchIncidentDigestTool::new())],
        },
        llm_client.clone(),
    );

    SupervisorAgent::new(
        "it_ops_supervisor",
        vec![log_investigator, metrics_analyst, incident_reporter],
        llm_client,
        settings.clone(),
    )
}
