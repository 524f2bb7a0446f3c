//! Supervisor agent: delegates tasks to specialized sub-agents and
//! combines their results into one answer.

use crate::agents::specialized::SpecializedAgent;
use crate::agents::{AgentOutcome, AgentStep};
use crate::config::Settings;
use crate::core::llm::{ChatMessage, LLMClient, LlmError};
use crate::inspect::AgentNode;
use serde::{Deserialize, Serialize};

/// Decision returned by the supervisor's LLM each orchestration step.
#[derive(Debug, Deserialize, Serialize)]
struct SupervisorDecision {
    thought: String,
    #[serde(default)]
    agent_to_invoke: Option<String>,
    #[serde(default)]
    agent_task: Option<String>,
    #[serde(default)]
    is_final: bool,
    #[serde(default)]
    final_answer: Option<String>,
}

pub struct SupervisorAgent {
    name: String,
    /// Declaration order is meaningful: it drives inspection output.
    sub_agents: Vec<SpecializedAgent>,
    llm_client: LLMClient,
    settings: Settings,
}

impl SupervisorAgent {
    pub fn new(
        name: impl Into<String>,
        sub_agents: Vec<SpecializedAgent>,
        llm_client: LLMClient,
        settings: Settings,
    ) -> Self {
        Self {
            name: name.into(),
            sub_agents,
            llm_client,
            settings,
        }
    }

    fn find_agent(&self, name: &str) -> Option<&SpecializedAgent> {
        self.sub_agents.iter().find(|a| a.name() == name)
    }

    /// Orchestrate `task` across the sub-agents, at most
    /// `max_orchestration_steps` supervisor model calls.
    pub async fn orchestrate(&self, task: &str) -> Result<AgentOutcome, LlmError> {
        tracing::info!("[{}] Orchestrating task: {}", self.name, task);

        let agent_descriptions: Vec<String> = self
            .sub_agents
            .iter()
            .map(|agent| format!("- {}: {}", agent.name(), agent.description()))
            .collect();

        let system_prompt = format!(
            "You are a supervisor coordinating specialized IT observability agents.\n\n\
             Available Agents:\n{}\n\n\
             Delegate focused tasks to the agents, then combine their findings. \
             When an agent produces data the next agent needs, include that data \
             verbatim in the next agent_task; the task text is the only input the \
             agent receives.\n\n\
             You MUST respond in this EXACT JSON format:\n\
             {{\n  \
               \"thought\": \"your reasoning about what to do next\",\n  \
               \"agent_to_invoke\": \"agent_name or null\",\n  \
               \"agent_task\": \"specific task for the agent or null\",\n  \
               \"is_final\": false,\n  \
               \"final_answer\": \"combined answer when is_final is true\" or null\n\
             }}\n\n\
             Set is_final to true only when you can answer the user's request in \
             full. Respond with valid JSON only. No extra text.",
            agent_descriptions.join("\n")
        );

        let mut messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(task.to_string()),
        ];
        let mut steps = Vec::new();

        let max_steps = self.settings.agent.max_orchestration_steps;
        for iteration in 1..=max_steps {
            let response = self.llm_client.chat(messages.clone()).await?;
            messages.push(ChatMessage::assistant(response.clone()));

            let decision = match parse_decision(&response) {
                Some(decision) => decision,
                None => {
                    tracing::warn!("[{}] Unparseable supervisor decision", self.name);
                    steps.push(AgentStep {
                        iteration,
                        thought: response,
                        action: None,
                        observation: Some("response was not valid decision JSON".to_string()),
                    });
                    messages.push(ChatMessage::user(
                        "Your last response was not valid JSON. Respond again using the \
                         required JSON format only.",
                    ));
                    continue;
                }
            };

            if decision.is_final {
                let result = decision
                    .final_answer
                    .unwrap_or_else(|| decision.thought.clone());
                steps.push(AgentStep {
                    iteration,
                    thought: decision.thought,
                    action: None,
                    observation: None,
                });
                return Ok(AgentOutcome::Success { result, steps });
            }

            let observation = match (&decision.agent_to_invoke, &decision.agent_task) {
                (Some(agent_name), Some(agent_task)) => {
                    self.delegate(agent_name, agent_task).await?
                }
                _ => "No agent/task given and is_final is false. Either delegate to an \
                      agent or finish with is_final=true."
                    .to_string(),
            };

            steps.push(AgentStep {
                iteration,
                thought: decision.thought,
                action: decision.agent_to_invoke.clone(),
                observation: Some(observation.clone()),
            });

            messages.push(ChatMessage::user(format!(
                "Result from {}: {}",
                decision.agent_to_invoke.as_deref().unwrap_or("(none)"),
                observation
            )));
        }

        Ok(AgentOutcome::Failure {
            error: format!(
                "[{}] Reached max orchestration steps ({}) without a final answer",
                self.name, max_steps
            ),
            steps,
        })
    }

    async fn delegate(&self, agent_name: &str, agent_task: &str) -> Result<String, LlmError> {
        let agent = match self.find_agent(agent_name) {
            Some(agent) => agent,
            None => {
                let known: Vec<&str> = self.sub_agents.iter().map(|a| a.name()).collect();
                return Ok(format!(
                    "Unknown agent '{}'. Available agents: {}",
                    agent_name,
                    known.join(", ")
                ));
            }
        };

        tracing::info!("[{}] Delegating to {}: {}", self.name, agent_name, agent_task);

        match agent
            .execute_task(agent_task, self.settings.agent.max_iterations)
            .await?
        {
            AgentOutcome::Success { result, .. } => Ok(result),
            AgentOutcome::Failure { error, .. } => Ok(format!("Agent failed: {}", error)),
        }
    }
}

fn parse_decision(response: &str) -> Option<SupervisorDecision> {
    if let Ok(decision) = serde_json::from_str::<SupervisorDecision>(response) {
        return Some(decision);
    }

    let start = response.find('{')?;
    let end = response.rfind('}')?;
    serde_json::from_str::<SupervisorDecision>(&response[start..=end]).ok()
}

impl AgentNode for SupervisorAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        "SupervisorAgent"
    }

    fn tool_names(&self) -> Vec<String> {
        // The supervisor only delegates; tools live on the sub-agents.
        Vec::new()
    }

    fn sub_agents(&self) -> Vec<&dyn AgentNode> {
        self.sub_agents
            .iter()
            .map(|a| a as &dyn AgentNode)
            .collect()
    }
}
