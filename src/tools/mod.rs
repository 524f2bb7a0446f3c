//! Tool system exposed to agents.
//!
//! Tools are named callables with a JSON argument surface. Identity is the
//! metadata name; implementations keep their execution details private
//! behind the trait.

pub mod executor;
pub mod incidents;
pub mod logs;
pub mod metrics;
pub mod registry;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Tool parameter schema definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub param_type: String,
    pub description: String,
    pub required: bool,
}

/// Tool metadata - describes what the tool does and how to use it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

impl fmt::Display for ToolMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.description)
    }
}

/// Result of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error.into()),
        }
    }
}

/// Contract all agent tools implement.
///
/// `validate` rejects malformed arguments before `execute` runs; execution
/// failures are reported through `ToolResult`, not `Err`.
#[async_trait]
pub trait Tool: Send + Sync {
    fn metadata(&self) -> ToolMetadata;

    async fn execute(&self, args: Value) -> Result<ToolResult>;

    fn validate(&self, _args: &Value) -> Result<()> {
        Ok(())
    }
}

/// Tool execution configuration
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub max_retries: u32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}
