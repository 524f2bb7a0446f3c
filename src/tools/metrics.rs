//! Utilization summary tool.

use super::{Tool, ToolMetadata, ToolParameter, ToolResult};
use crate::telemetry;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

const DEFAULT_INCLUDE_RECENT: usize = 3;

/// Exposes `telemetry::summarize_utilization` to agents.
pub struct SummarizeUtilizationTool;

impl SummarizeUtilizationTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SummarizeUtilizationTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for SummarizeUtilizationTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "summarize_utilization".to_string(),
            description: "Summarize fleet CPU/memory/disk utilization over an hour lookback, \
                          including the most recent samples."
                .to_string(),
            parameters: vec![
                ToolParameter {
                    name: "hours".to_string(),
                    param_type: "integer".to_string(),
                    description: "Lookback window in hours (must be positive)".to_string(),
                    required: true,
                },
                ToolParameter {
                    name: "include_recent".to_string(),
                    param_type: "integer".to_string(),
                    description: "How many recent samples to include (default 3, clamped to \
                                  what the window holds)"
                        .to_string(),
                    required: false,
                },
            ],
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        if args["hours"].as_i64().is_none() {
            return Err(anyhow::anyhow!(
                "'hours' parameter is required and must be an integer"
            ));
        }

        if !args["include_recent"].is_null() && args["include_recent"].as_u64().is_none() {
            return Err(anyhow::anyhow!(
                "'include_recent' must be a non-negative integer"
            ));
        }

        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;

        let hours = args["hours"].as_i64().unwrap_or_default();
        let include_recent = args["include_recent"]
            .as_u64()
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_INCLUDE_RECENT);

        tracing::info!(
            "Summarizing utilization over {}h with {} recent samples",
            hours,
            include_recent
        );

        match telemetry::summarize_utilization(hours, include_recent) {
            Ok(summary) => Ok(ToolResult::success(serde_json::to_string_pretty(&summary)?)),
            Err(e) => Ok(ToolResult::failure(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_summarize_success() {
        let tool = SummarizeUtilizationTool::new();
        let args = json!({"hours": 12, "include_recent": 3});

        let result = tool.execute(args).await.unwrap();
        assert!(result.success);
        assert!(result.output.contains("cpu_avg_pct"));
    }

    #[tokio::test]
    async fn test_summarize_invalid_hours() {
        let tool = SummarizeUtilizationTool::new();
        let args = json!({"hours": 0});

        let result = tool.execute(args).await.unwrap();
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_summarize_missing_hours_rejected() {
        let tool = SummarizeUtilizationTool::new();
        assert!(tool.execute(json!({})).await.is_err());
    }
}
