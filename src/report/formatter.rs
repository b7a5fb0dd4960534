use crate::flow::{ChatbotFlowData, FlowEdge, FlowNode, NodeKind, Point};
use std::fmt;

/// Documentation block appended to every report. Constant across invocations.
pub const SCHEMA_DESCRIPTION: &str = "\
## 🔧 Flow Schema

This flow data conforms to the following interfaces:

```typescript
interface ChatbotFlowData {
  nodes: FlowNode[];
  edges: FlowEdge[];
  timestamp?: number;
  metadata?: Record<string, any>;
}

interface FlowNode {
  id: string;
  type: string;
  position: { x: number; y: number };
  data: NodeData;
}

interface FlowEdge {
  id: string;
  source: string;
  target: string;
  type: string;
}
```";

const CLOSING_LINE: &str =
    "✅ Your chatbot flow has been saved and can now be exported or integrated into your system.";

/// Renders a validated flow into the markdown report shown in the chat.
pub struct ReportFormatter;

impl ReportFormatter {
    /// Renders the full report. Pure and deterministic.
    pub fn render(graph: &ChatbotFlowData) -> String {
        FlowReport(graph).to_string()
    }
}

/// `Display` adapter so the report streams straight into any formatter.
pub struct FlowReport<'a>(pub &'a ChatbotFlowData);

impl fmt::Display for FlowReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;

        writeln!(f, "# 🤖 Chatbot Flow Saved Successfully")?;
        writeln!(f)?;
        writeln!(f, "**Flow Statistics:**")?;
        writeln!(f, "- Nodes: {}", graph.nodes.len())?;
        writeln!(f, "- Connections: {}", graph.edges.len())?;
        writeln!(f)?;
        writeln!(f, "## 📋 Flow Structure")?;
        writeln!(f)?;

        if !graph.nodes.is_empty() {
            writeln!(f, "### Nodes:")?;
            for (i, node) in graph.nodes.iter().enumerate() {
                write_node(f, i + 1, node)?;
            }
        }

        if !graph.edges.is_empty() {
            writeln!(f, "### Connections:")?;
            for (i, edge) in graph.edges.iter().enumerate() {
                write_edge(f, i + 1, edge)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", SCHEMA_DESCRIPTION)?;
        writeln!(f)?;

        // Serializing the flow model cannot fail: every map key is a string.
        let json = graph.to_canonical_json().map_err(|_| fmt::Error)?;
        writeln!(f, "## 📄 Raw Flow Data")?;
        writeln!(f)?;
        writeln!(f, "<details>")?;
        writeln!(f, "<summary>Click to view the flow JSON</summary>")?;
        writeln!(f)?;
        writeln!(f, "```json")?;
        writeln!(f, "{}", json)?;
        writeln!(f, "```")?;
        writeln!(f)?;
        writeln!(f, "</details>")?;
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)?;
        write!(f, "{}", CLOSING_LINE)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, ordinal: usize, node: &FlowNode) -> fmt::Result {
    writeln!(f, "{}. **{}** (ID: `{}`)", ordinal, node.node_type, node.id)?;
    match &node.kind {
        NodeKind::TextMessage { channel, message } => {
            writeln!(f, "   - Channel: {}", channel)?;
            writeln!(f, "   - Message: {}", message)?;
        }
        NodeKind::ConditionalPath { condition } => {
            writeln!(f, "   - Condition: {}", condition)?;
        }
        NodeKind::Start | NodeKind::End | NodeKind::Generic => {}
    }
    writeln!(f, "   - Position: {}", format_point(&node.position))?;
    writeln!(f)
}

fn write_edge(f: &mut fmt::Formatter<'_>, ordinal: usize, edge: &FlowEdge) -> fmt::Result {
    writeln!(
        f,
        "{}. {} → {} (Type: {})",
        ordinal, edge.source, edge.target, edge.edge_type
    )
}

/// Coordinates keep their native decimal form, so `100` prints as `100.0`.
fn format_point(point: &Point) -> String {
    format!("({:?}, {:?})", point.x, point.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_point_keeps_decimal_point() {
        assert_eq!(format_point(&Point::new(100.0, 50.0)), "(100.0, 50.0)");
        assert_eq!(format_point(&Point::new(-2.5, 0.125)), "(-2.5, 0.125)");
    }

    #[test]
    fn test_schema_block_is_fenced() {
        assert!(SCHEMA_DESCRIPTION.starts_with("## 🔧 Flow Schema"));
        assert!(SCHEMA_DESCRIPTION.ends_with("```"));
    }
}
