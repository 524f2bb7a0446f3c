//! Agent tree inspection.
//!
//! Renders a composed agent hierarchy as indented text for diagnostics.
//! Nodes expose a formal contract (`AgentNode`) instead of being probed
//! for optional attributes.

use std::collections::HashSet;

/// Contract every inspectable node in the agent tree fulfils.
pub trait AgentNode {
    /// Node name, e.g. `it_ops_supervisor`.
    fn name(&self) -> &str;

    /// Kind tag, e.g. `SupervisorAgent` or `SpecializedAgent`.
    fn kind(&self) -> &str;

    /// Tool names in declaration order. Empty when the node has no tools.
    fn tool_names(&self) -> Vec<String>;

    /// Child agents in declared order.
    fn sub_agents(&self) -> Vec<&dyn AgentNode>;
}

/// Render the hierarchy rooted at `root`, depth-first pre-order.
///
/// Each node emits one `- name [kind]` line indented two spaces per depth
/// level, plus a `tools:` line when it has any. Output grows with the tree;
/// nothing is truncated. Trees are acyclic by construction, but a visited
/// set guards against accidental cycles so rendering always terminates.
pub fn render_agent_tree(root: &dyn AgentNode) -> String {
    let mut out = String::new();
    let mut visited: HashSet<*const (dyn AgentNode + '_)> = HashSet::new();
    render_node(root, 0, &mut visited, &mut out);
    out
}

fn render_node<'a>(
    node: &'a dyn AgentNode,
    depth: usize,
    visited: &mut HashSet<*const (dyn AgentNode + 'a)>,
    out: &mut String,
) {
    // Keyed on the full fat pointer: distinct node types can share a data
    // address (zero-sized nodes, a node and its first field), so the
    // vtable half is needed to tell them apart.
    let key = node as *const dyn AgentNode;
    if !visited.insert(key) {
        tracing::warn!(
            "agent tree revisits node '{}'; skipping to avoid a cycle",
            node.name()
        );
        return;
    }

    let prefix = "  ".repeat(depth);
    out.push_str(&format!("{}- {} [{}]\n", prefix, node.name(), node.kind()));

    let tools = node.tool_names();
    if !tools.is_empty() {
        out.push_str(&format!("{}  tools: {}\n", prefix, tools.join(", ")));
    }

    for child in node.sub_agents() {
        render_node(child, depth + 1, visited, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestNode {
        name: String,
        tools: Vec<String>,
        children: Vec<TestNode>,
    }

    impl TestNode {
        fn new(name: &str, tools: &[&str], children: Vec<TestNode>) -> Self {
            Self {
                name: name.to_string(),
                tools: tools.iter().map(|t| t.to_string()).collect(),
                children,
            }
        }

        fn count_nodes(&self) -> usize {
            1 + self.children.iter().map(TestNode::count_nodes).sum::<usize>()
        }

        fn count_tooled(&self) -> usize {
            usize::from(!self.tools.is_empty())
                + self.children.iter().map(TestNode::count_tooled).sum::<usize>()
        }
    }

    impl AgentNode for TestNode {
        fn name(&self) -> &str {
            &self.name
        }

        fn kind(&self) -> &str {
            "TestNode"
        }

        fn tool_names(&self) -> Vec<String> {
            self.tools.clone()
        }

        fn sub_agents(&self) -> Vec<&dyn AgentNode> {
            self.children.iter().map(|c| c as &dyn AgentNode).collect()
        }
    }

    #[test]
    fn test_three_node_tree_renders_five_lines() {
        let root = TestNode::new(
            "supervisor",
            &["fetch_server_logs", "summarize_utilization"],
            vec![
                TestNode::new("investigator", &["fetch_server_logs"], vec![]),
                TestNode::new("reporter", &["fetch_incident_digest"], vec![]),
            ],
        );

        let rendered = render_agent_tree(&root);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "- supervisor [TestNode]");
        assert_eq!(lines[1], "  tools: fetch_server_logs, summarize_utilization");
        assert_eq!(lines[2], "  - investigator [TestNode]");
        assert_eq!(lines[3], "    tools: fetch_server_logs");
        assert_eq!(lines[4], "  - reporter [TestNode]");
    }

    #[test]
    fn test_line_count_property() {
        let trees = [
            TestNode::new("solo", &[], vec![]),
            TestNode::new("solo_tooled", &["a"], vec![]),
            TestNode::new(
                "deep",
                &["a", "b"],
                vec![TestNode::new(
                    "mid",
                    &[],
                    vec![TestNode::new("leaf", &["c"], vec![])],
                )],
            ),
            TestNode::new(
                "wide",
                &[],
                vec![
                    TestNode::new("c1", &["t"], vec![]),
                    TestNode::new("c2", &[], vec![]),
                    TestNode::new("c3", &["t", "u"], vec![]),
                ],
            ),
        ];

        for tree in &trees {
            let rendered = render_agent_tree(tree);
            assert_eq!(
                rendered.lines().count(),
                tree.count_nodes() + tree.count_tooled(),
                "tree '{}'",
                tree.name
            );
        }
    }

    #[test]
    fn test_children_render_in_declared_order() {
        let root = TestNode::new(
            "root",
            &[],
            vec![
                TestNode::new("first", &[], vec![]),
                TestNode::new("second", &[], vec![]),
                TestNode::new("third", &[], vec![]),
            ],
        );

        let rendered = render_agent_tree(&root);
        let first = rendered.find("first").unwrap();
        let second = rendered.find("second").unwrap();
        let third = rendered.find("third").unwrap();

        assert!(first < second && second < third);
    }

    #[test]
    fn test_address_coincident_nodes_all_render() {
        // Zero-sized nodes of different types can share a data address;
        // neither must be mistaken for a revisit of the other.
        struct LogLeaf;
        struct MetricsLeaf;

        impl AgentNode for LogLeaf {
            fn name(&self) -> &str {
                "log_leaf"
            }
            fn kind(&self) -> &str {
                "LogLeaf"
            }
            fn tool_names(&self) -> Vec<String> {
                Vec::new()
            }
            fn sub_agents(&self) -> Vec<&dyn AgentNode> {
                Vec::new()
            }
        }

        impl AgentNode for MetricsLeaf {
            fn name(&self) -> &str {
                "metrics_leaf"
            }
            fn kind(&self) -> &str {
                "MetricsLeaf"
            }
            fn tool_names(&self) -> Vec<String> {
                Vec::new()
            }
            fn sub_agents(&self) -> Vec<&dyn AgentNode> {
                Vec::new()
            }
        }

        struct Root {
            logs: LogLeaf,
            metrics: MetricsLeaf,
        }

        impl AgentNode for Root {
            fn name(&self) -> &str {
                "root"
            }
            fn kind(&self) -> &str {
                "Root"
            }
            fn tool_names(&self) -> Vec<String> {
                Vec::new()
            }
            fn sub_agents(&self) -> Vec<&dyn AgentNode> {
                vec![&self.logs, &self.metrics]
            }
        }

        let root = Root {
            logs: LogLeaf,
            metrics: MetricsLeaf,
        };
        let rendered = render_agent_tree(&root);

        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.contains("log_leaf"));
        assert!(rendered.contains("metrics_leaf"));
    }

    #[test]
    fn test_indentation_tracks_depth() {
        let root = TestNode::new(
            "root",
            &[],
            vec![TestNode::new(
                "child",
                &[],
                vec![TestNode::new("grandchild", &[], vec![])],
            )],
        );

        let rendered = render_agent_tree(&root);
        assert!(rendered.contains("\n  - child"));
        assert!(rendered.contains("\n    - grandchild"));
    }
}
