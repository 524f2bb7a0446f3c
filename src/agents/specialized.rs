//! Specialized agent: a domain-scoped ReAct loop over a fixed tool set.

use crate::agents::{AgentOutcome, AgentStep};
use crate::config::Settings;
use crate::core::llm::{ChatMessage, LLMClient, LlmError};
use crate::inspect::AgentNode;
use crate::tools::{executor::ToolExecutor, registry::ToolRegistry, Tool};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct SpecializedAgentConfig {
    pub name: String,
    pub description: String,
    pub system_prompt: String,
    pub tools: Vec<Arc<dyn Tool>>,
}

impl std::fmt::Debug for SpecializedAgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecializedAgentConfig")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("tools_count", &self.tools.len())
            .finish()
    }
}

/// Decision structure returned by the agent's LLM each iteration.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AgentDecision {
    thought: String,
    #[serde(default)]
    action: Option<AgentAction>,
    #[serde(default)]
    is_final: bool,
    #[serde(default, deserialize_with = "deserialize_final_answer")]
    final_answer: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct AgentAction {
    tool: String,
    input: Value,
}

/// Accepts either a string or any JSON value for the final answer.
fn deserialize_final_answer<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Ok(Some(
            serde_json::to_string_pretty(&other).map_err(Error::custom)?,
        )),
    }
}

pub struct SpecializedAgent {
    config: SpecializedAgentConfig,
    llm_client: LLMClient,
    tool_registry: ToolRegistry,
    tool_executor: ToolExecutor,
}

impl SpecializedAgent {
    pub fn new(config: SpecializedAgentConfig, settings: &Settings, api_key: String) -> Self {
        Self::with_client(config, LLMClient::new(api_key, settings.clone()))
    }

    /// Construct with a pre-built client (tests point this at a mock server).
    pub fn with_client(config: SpecializedAgentConfig, llm_client: LLMClient) -> Self {
        let mut tool_registry = ToolRegistry::new();
        for tool in &config.tools {
            tool_registry.register(Arc::clone(tool));
        }

        Self {
            config,
            llm_client,
            tool_registry,
            tool_executor: ToolExecutor::default(),
        }
    }

    pub fn description(&self) -> &str {
        &self.config.description
    }

    /// Run the ReAct loop for `task`, at most `max_iterations` model calls.
    pub async fn execute_task(
        &self,
        task: &str,
        max_iterations: usize,
    ) -> Result<AgentOutcome, LlmError> {
        tracing::info!("[{}] Executing task: {}", self.config.name, task);

        let system_prompt = format!(
            "{}\n\nAvailable Tools:\n{}\n\n\
             You MUST respond in this EXACT JSON format:\n\
             {{\n  \
               \"thought\": \"your reasoning\",\n  \
               \"action\": {{\"tool\": \"tool_name\", \"input\": {{...}}}} or null,\n  \
               \"is_final\": false,\n  \
               \"final_answer\": \"your answer when is_final is true\" or null\n\
             }}\n\n\
             Call at most one tool per response. When you have what you need, \
             set is_final to true and put the complete answer in final_answer.\n\
             Respond with valid JSON only. No extra text.",
            self.config.system_prompt,
            self.tool_registry.tools_description()
        );

        let mut messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(task.to_string()),
        ];
        let mut steps = Vec::new();

        for iteration in 1..=max_iterations {
            let response = self.llm_client.chat(messages.clone()).await?;
            messages.push(ChatMessage::assistant(response.clone()));

            let decision = match parse_decision(&response) {
                Some(decision) => decision,
                None => {
                    tracing::warn!(
                        "[{}] Could not parse decision, asking for valid JSON",
                        self.config.name
                    );
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

            let observation = match decision.action {
                Some(ref action) => self.run_tool(action).await,
                None => "No action given and is_final is false. Either call a tool or \
                         finish with is_final=true."
                    .to_string(),
            };

            steps.push(AgentStep {
                iteration,
                thought: decision.thought,
                action: decision.action.as_ref().map(|a| a.tool.clone()),
                observation: Some(observation.clone()),
            });

            messages.push(ChatMessage::user(format!("Observation: {}", observation)));
        }

        Ok(AgentOutcome::Failure {
            error: format!(
                "[{}] Reached max iterations ({}) without a final answer",
                self.config.name, max_iterations
            ),
            steps,
        })
    }

    async fn run_tool(&self, action: &AgentAction) -> String {
        let tool = match self.tool_registry.get(&action.tool) {
            Some(tool) => tool,
            None => {
                return format!(
                    "Unknown tool '{}'. Available tools: {}",
                    action.tool,
                    self.tool_registry.tool_names().join(", ")
                );
            }
        };

        match self.tool_executor.execute(tool, action.input.clone()).await {
            Ok(result) if result.success => result.output,
            Ok(result) => format!(
                "Tool '{}' failed: {}",
                action.tool,
                result.error.unwrap_or_else(|| "unknown error".to_string())
            ),
            Err(e) => format!("Tool '{}' rejected the arguments: {}", action.tool, e),
        }
    }
}

fn parse_decision(response: &str) -> Option<AgentDecision> {
    if let Ok(decision) = serde_json::from_str::<AgentDecision>(response) {
        return Some(decision);
    }

    // The model sometimes wraps the JSON in prose or a code fence.
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    serde_json::from_str::<AgentDecision>(&response[start..=end]).ok()
}

impl AgentNode for SpecializedAgent {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn kind(&self) -> &str {
        "SpecializedAgent"
    }

    fn tool_names(&self) -> Vec<String> {
        self.config
            .tools
            .iter()
            .map(|t| t.metadata().name)
            .collect()
    }

    fn sub_agents(&self) -> Vec<&dyn AgentNode> {
        Vec::new()
    }
}
