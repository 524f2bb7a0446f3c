//! Runner: drives prompts through the supervisor against the hosted model.
//!
//! Quota exhaustion is surfaced as a distinct error so automated checks
//! can skip instead of failing, and interactive use gets a clear message.

use crate::agents::{AgentOutcome, SupervisorAgent};
use crate::core::llm::LlmError;
use crate::utils;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("model quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error(transparent)]
    Llm(LlmError),
}

impl From<LlmError> for RunnerError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::RateLimited(msg) => RunnerError::QuotaExhausted(msg),
            other => RunnerError::Llm(other),
        }
    }
}

/// One captured runner event: who said what.
#[derive(Debug, Clone)]
pub struct RunnerEvent {
    pub author: String,
    pub text: String,
}

pub struct Runner {
    supervisor: SupervisorAgent,
    verbose: bool,
    quiet: bool,
}

impl Runner {
    pub fn new(supervisor: SupervisorAgent) -> Self {
        Self {
            supervisor,
            verbose: false,
            quiet: false,
        }
    }

    /// Print delegation steps alongside final answers.
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Suppress console transcripts; callers read the returned events.
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Send each prompt through the supervisor, collecting events.
    pub async fn run_debug(&self, prompts: &[String]) -> Result<Vec<RunnerEvent>, RunnerError> {
        let mut events = Vec::new();

        for prompt in prompts {
            if !self.quiet {
                utils::print_prompt_line(prompt);
            }

            let outcome = self.supervisor.orchestrate(prompt).await?;

            if self.verbose && !self.quiet {
                for step in outcome.steps() {
                    let target = step.action.as_deref().unwrap_or("-");
                    utils::print_info(&format!(
                        "  step {} -> {}: {}",
                        step.iteration, target, step.thought
                    ));
                }
            }

            let (author, text) = match outcome {
                AgentOutcome::Success { result, .. } => ("it_ops_supervisor", result),
                AgentOutcome::Failure { error, .. } => {
                    tracing::warn!("Supervisor did not finish: {}", error);
                    ("it_ops_supervisor", error)
                }
            };

            if !self.quiet {
                println!("{}\n", text);
            }

            events.push(RunnerEvent {
                author: author.to_string(),
                text,
            });
        }

        Ok(events)
    }
}
