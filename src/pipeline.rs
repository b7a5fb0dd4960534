use crate::error::PayloadError;
use crate::flow::{self, ChatbotFlowData};
use crate::report::ReportFormatter;
use serde_json::Value;
use tracing::{debug, warn};

/// Validates builder payloads and renders them into chat-ready reports.
///
/// A `FlowGraphPipeline` holds no state between invocations. Construct one
/// wherever an action needs it; concurrent use from several chat sessions
/// needs no coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowGraphPipeline;

impl FlowGraphPipeline {
    pub fn new() -> Self {
        Self
    }

    /// Decodes and validates a raw payload (a JSON object or a JSON string).
    ///
    /// # Returns
    ///
    /// * `Ok(ChatbotFlowData)`: every node and edge has a non-empty `id` and
    ///   `type`, and every position holds two finite numbers.
    /// * `Err(PayloadError)`: `MalformedPayload` for undecodable text,
    ///   `UnsupportedPayloadType` for anything but an object or a string, and
    ///   `SchemaViolation` naming the offending field path otherwise.
    pub fn parse_payload(&self, raw: &Value) -> Result<ChatbotFlowData, PayloadError> {
        let graph = flow::parse_payload(raw)?;
        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "validated flow payload"
        );

        let dangling = graph.dangling_edges().count();
        if dangling > 0 {
            warn!(
                dangling,
                "flow contains edges referencing unknown nodes; rendering them as-is"
            );
        }
        Ok(graph)
    }

    /// Renders the markdown report for a validated graph. Never fails.
    pub fn render_report(&self, graph: &ChatbotFlowData) -> String {
        ReportFormatter::render(graph)
    }

    /// `parse_payload` followed by `render_report`.
    pub fn process(&self, raw: &Value) -> Result<String, PayloadError> {
        let graph = self.parse_payload(raw)?;
        Ok(self.render_report(&graph))
    }
}
