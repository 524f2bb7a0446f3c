//! Tool executor with retry on transient failure.

use super::{Tool, ToolConfig, ToolResult};
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;
use tokio::time::{sleep, Duration};

pub struct ToolExecutor {
    config: ToolConfig,
}

impl ToolExecutor {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub async fn execute(&self, tool: Arc<dyn Tool>, args: Value) -> Result<ToolResult> {
        let mut last_error = None;
        let tool_name = tool.metadata().name.clone();

        for attempt in 0..self.config.max_retries {
            if attempt > 0 {
                tracing::warn!(
                    "Retrying tool '{}' (attempt {}/{})",
                    tool_name,
                    attempt + 1,
                    self.config.max_retries
                );
                sleep(Duration::from_millis(backoff_ms(attempt))).await;
            }

            match tool.execute(args.clone()).await {
                Ok(result) => {
                    if result.success || !should_retry(&result) {
                        return Ok(result);
                    }
                    last_error = result.error;
                }
                // Tools reserve `Err` for argument rejection, which no
                // amount of retrying can fix.
                Err(e) => return Err(e),
            }
        }

        Ok(ToolResult::failure(format!(
            "Tool '{}' failed after {} attempts. Last error: {}",
            tool_name,
            self.config.max_retries,
            last_error.unwrap_or_else(|| "Unknown error".to_string())
        )))
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::new(ToolConfig::default())
    }
}

fn backoff_ms(attempt: u32) -> u64 {
    let base_delay = 100;
    let max_delay = 5000;
    (base_delay * 2_u64.pow(attempt)).min(max_delay)
}

/// Validation failures are final; anything else may be transient.
fn should_retry(result: &ToolResult) -> bool {
    if let Some(ref error) = result.error {
        let error_lower = error.to_lowercase();
        if error_lower.contains("must be")
            || error_lower.contains("required")
            || error_lower.contains("cannot be empty")
        {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ToolMetadata, ToolResult};
    use async_trait::async_trait;

    struct FlakyTool {
        fail_count: std::sync::Mutex<u32>,
        max_fails: u32,
    }

    impl FlakyTool {
        fn new(max_fails: u32) -> Self {
            Self {
                fail_count: std::sync::Mutex::new(0),
                max_fails,
            }
        }
    }

    #[async_trait]
    impl Tool for FlakyTool {
        fn metadata(&self) -> ToolMetadata {
            ToolMetadata {
                name: "flaky_tool".to_string(),
                description: "Fails a configured number of times".to_string(),
                parameters: vec![],
            }
        }

        async fn execute(&self, _args: Value) -> Result<ToolResult> {
            let mut count = self.fail_count.lock().unwrap();
            *count += 1;

            if *count <= self.max_fails {
                Ok(ToolResult::failure("Temporary failure"))
            } else {
                Ok(ToolResult::success("Success after retries"))
            }
        }
    }

    #[tokio::test]
    async fn test_executor_retry_success() {
        let executor = ToolExecutor::new(ToolConfig { max_retries: 3 });

        let tool = Arc::new(FlakyTool::new(2));
        let result = executor.execute(tool, serde_json::json!({})).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("Success after retries"));
    }

    #[tokio::test]
    async fn test_executor_retry_exhausted() {
        let executor = ToolExecutor::new(ToolConfig { max_retries: 2 });

        let tool = Arc::new(FlakyTool::new(5));
        let result = executor.execute(tool, serde_json::json!({})).await.unwrap();

        assert!(!result.success);
        assert!(result.error.unwrap().contains("failed after"));
    }

    #[tokio::test]
    async fn test_executor_err_is_final() {
        struct ErroringTool {
            calls: std::sync::Mutex<u32>,
        }

        #[async_trait]
        impl Tool for ErroringTool {
            fn metadata(&self) -> ToolMetadata {
                ToolMetadata {
                    name: "erroring_tool".to_string(),
                    description: "Rejects its arguments".to_string(),
                    parameters: vec![],
                }
            }

            async fn execute(&self, _args: Value) -> Result<ToolResult> {
                *self.calls.lock().unwrap() += 1;
                Err(anyhow::anyhow!("'server_id' parameter is required"))
            }
        }

        let executor = ToolExecutor::new(ToolConfig { max_retries: 3 });
        let tool = Arc::new(ErroringTool {
            calls: std::sync::Mutex::new(0),
        });

        let result = executor
            .execute(Arc::clone(&tool) as Arc<dyn Tool>, serde_json::json!({}))
            .await;

        assert!(result.is_err());
        // Argument rejection is deterministic, so one attempt only.
        assert_eq!(*tool.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_executor_no_retry_on_validation_failure() {
        struct RejectingTool;

        #[async_trait]
        impl Tool for RejectingTool {
            fn metadata(&self) -> ToolMetadata {
                ToolMetadata {
                    name: "rejecting_tool".to_string(),
                    description: "Always rejects its input".to_string(),
                    parameters: vec![],
                }
            }

            async fn execute(&self, _args: Value) -> Result<ToolResult> {
                Ok(ToolResult::failure("'hours' must be positive"))
            }
        }

        let executor = ToolExecutor::new(ToolConfig { max_retries: 3 });
        let result = executor
            .execute(Arc::new(RejectingTool), serde_json::json!({}))
            .await
            .unwrap();

        assert!(!result.success);
        // Final on the first attempt, no retry wrapper in the message.
        assert!(!result.error.unwrap().contains("failed after"));
    }
}
