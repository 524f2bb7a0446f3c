//! Server log retrieval tool.

use super::{Tool, ToolMetadata, ToolParameter, ToolResult};
use crate::telemetry;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

const DEFAULT_WINDOW_MINUTES: i64 = 60;

/// Exposes `telemetry::fetch_server_logs` to agents.
pub struct FetchServerLogsTool;

impl FetchServerLogsTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FetchServerLogsTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FetchServerLogsTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "fetch_server_logs".to_string(),
            description: "Fetch recent log lines for a server over a minute window. \
                          Use this to investigate anomalies on a specific host."
                .to_string(),
            parameters: vec![
                ToolParameter {
                    name: "server_id".to_string(),
                    param_type: "string".to_string(),
                    description: "Server identifier, e.g. prod-app-01".to_string(),
                    required: true,
                },
                ToolParameter {
                    name: "window_minutes".to_string(),
                    param_type: "integer".to_string(),
                    description: "Lookback window in minutes (default 60, must be positive)"
                        .to_string(),
                    required: false,
                },
            ],
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        let server_id = args["server_id"].as_str().ok_or_else(|| {
            anyhow::anyhow!("'server_id' parameter is required and must be a string")
        })?;

        if server_id.is_empty() {
            return Err(anyhow::anyhow!("'server_id' cannot be empty"));
        }

        if !args["window_minutes"].is_null() && args["window_minutes"].as_i64().is_none() {
            return Err(anyhow::anyhow!("'window_minutes' must be an integer"));
        }

        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;

        let server_id = args["server_id"].as_str().unwrap_or_default();
        let window_minutes = args["window_minutes"]
            .as_i64()
            .unwrap_or(DEFAULT_WINDOW_MINUTES);

        tracing::info!(
            "Fetching logs for {} over the last {}m",
            server_id,
            window_minutes
        );

        match telemetry::fetch_server_logs(server_id, window_minutes) {
            Ok(logs) => Ok(ToolResult::success(logs)),
            Err(e) => Ok(ToolResult::failure(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_logs_success() {
        let tool = FetchServerLogsTool::new();
        let args = json!({"server_id": "prod-app-01", "window_minutes": 30});

        let result = tool.execute(args).await.unwrap();
        assert!(result.success);
        assert!(result.output.contains("prod-app-01"));
    }

    #[tokio::test]
    async fn test_fetch_logs_default_window() {
        let tool = FetchServerLogsTool::new();
        let args = json!({"server_id": "prod-app-01"});

        let result = tool.execute(args).await.unwrap();
        assert!(result.success);
        assert!(result.output.contains("last 60m"));
    }

    #[tokio::test]
    async fn test_fetch_logs_negative_window_fails() {
        let tool = FetchServerLogsTool::new();
        let args = json!({"server_id": "prod-app-01", "window_minutes": -5});

        let result = tool.execute(args).await.unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("positive"));
    }

    #[tokio::test]
    async fn test_fetch_logs_missing_server_id() {
        let tool = FetchServerLogsTool::new();
        let args = json!({"window_minutes": 30});

        assert!(tool.execute(args).await.is_err());
    }
}
