//! Incident digest tool.

use super::{Tool, ToolMetadata, ToolResult};
use crate::telemetry;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Exposes `telemetry::fetch_incident_digest` to agents.
pub struct FetchIncidentDigestTool;

impl FetchIncidentDigestTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FetchIncidentDigestTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FetchIncidentDigestTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: "fetch_incident_digest".to_string(),
            description: "Fetch the digest of the most relevant open incident ticket: \
                          title, severity, affected systems, and narrative."
                .to_string(),
            parameters: vec![],
        }
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult> {
        tracing::info!("Fetching incident digest");

        let digest = telemetry::fetch_incident_digest();
        Ok(ToolResult::success(serde_json::to_string_pretty(&digest)?))
    }
}
