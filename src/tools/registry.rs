//! Tool registry keyed by tool name.

use super::{Tool, ToolMetadata};
use std::collections::HashMap;
use std::sync::Arc;

pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    /// Registration order, preserved for prompts and inspection output.
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.metadata().name.clone();
        tracing::info!("Registering tool: {}", name);
        if !self.tools.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.tools.insert(name, tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn list_tools(&self) -> Vec<ToolMetadata> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.metadata())
            .collect()
    }

    /// Formatted tool descriptions for the agent system prompt.
    pub fn tools_description(&self) -> String {
        let mut descriptions = Vec::new();
        for metadata in self.list_tools() {
            let params = metadata
                .parameters
                .iter()
                .map(|p| {
                    let required = if p.required { "required" } else { "optional" };
                    format!(
                        "  - {} ({}): {} [{}]",
                        p.name, p.param_type, p.description, required
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");

            descriptions.push(format!(
                "Tool: {}\nDescription: {}\nParameters:\n{}",
                metadata.name, metadata.description, params
            ));
        }
        descriptions.join("\n\n")
    }

    /// Registry with the full observability tool set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(crate::tools::logs::FetchServerLogsTool::new()));
        registry.register(Arc::new(
            crate::tools::metrics::SummarizeUtilizationTool::new(),
        ));
        registry.register(Arc::new(
            crate::tools::incidents::FetchIncidentDigestTool::new(),
        ));

        registry
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::logs::FetchServerLogsTool;

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FetchServerLogsTool::new()));

        assert!(registry.has_tool("fetch_server_logs"));
        assert!(registry.get("fetch_server_logs").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_registry_defaults() {
        let registry = ToolRegistry::with_defaults();

        assert!(registry.has_tool("fetch_server_logs"));
        assert!(registry.has_tool("summarize_utilization"));
        assert!(registry.has_tool("fetch_incident_digest"));
        assert_eq!(registry.list_tools().len(), 3);
    }

    #[test]
    fn test_registry_preserves_registration_order() {
        let registry = ToolRegistry::with_defaults();

        assert_eq!(
            registry.tool_names(),
            vec![
                "fetch_server_logs",
                "summarize_utilization",
                "fetch_incident_digest"
            ]
        );
    }

    #[test]
    fn test_tools_description() {
        let registry = ToolRegistry::with_defaults();
        let description = registry.tools_description();

        assert!(description.contains("fetch_server_logs"));
        assert!(description.contains("Description:"));
        assert!(description.contains("Parameters:"));
    }
}
