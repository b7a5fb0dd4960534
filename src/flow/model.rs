use ahash::AHashSet;
use serde::Serialize;
use serde_json::{Map, Value};

/// Node type tags the builder ships with. Anything else is rendered generically.
pub const START_NODE: &str = "start";
pub const END_NODE: &str = "end";
pub const TEXT_MESSAGE_NODE: &str = "textMessage";
pub const CONDITIONAL_PATH_NODE: &str = "conditionalPath";

pub const DEFAULT_CHANNEL: &str = "sms";
pub const DEFAULT_EDGE_TYPE: &str = "default";

/// A position on the builder canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Typed view over a node's `data` map, selected by the node's `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Start,
    End,
    TextMessage { channel: String, message: String },
    ConditionalPath { condition: String },
    /// Node kinds only the external editor knows about.
    Generic,
}

/// One step of a chatbot conversation flow.
///
/// `data` holds the payload exactly as the editor sent it and is what gets
/// re-serialized; `kind` is the typed interpretation used for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Point,
    pub data: Map<String, Value>,
    #[serde(skip)]
    pub kind: NodeKind,
}

impl FlowNode {
    /// Builds a node, deriving its `kind` from `node_type` and `data`.
    pub fn new(
        id: impl Into<String>,
        node_type: impl Into<String>,
        position: Point,
        data: Map<String, Value>,
    ) -> Self {
        let node_type = node_type.into();
        let kind = NodeKind::from_data(&node_type, &data);
        Self {
            id: id.into(),
            node_type,
            position,
            data,
            kind,
        }
    }
}

impl NodeKind {
    /// Dispatches on the `type` tag. Field defaults are applied here; type
    /// checking of the known fields happens during payload parsing.
    pub fn from_data(node_type: &str, data: &Map<String, Value>) -> Self {
        let text = |key: &str, default: &str| {
            data.get(key)
                .and_then(Value::as_str)
                .unwrap_or(default)
                .to_string()
        };

        match node_type {
            START_NODE => NodeKind::Start,
            END_NODE => NodeKind::End,
            TEXT_MESSAGE_NODE => NodeKind::TextMessage {
                channel: text("channel", DEFAULT_CHANNEL),
                message: text("message", ""),
            },
            CONDITIONAL_PATH_NODE => NodeKind::ConditionalPath {
                condition: text("condition", ""),
            },
            _ => NodeKind::Generic,
        }
    }
}

/// A directed transition between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: String,
}

impl FlowEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            edge_type: DEFAULT_EDGE_TYPE.to_string(),
        }
    }
}

/// The complete flow as submitted by the builder.
///
/// Serializing this struct yields the canonical encoding: nodes as
/// `id, type, position, data`, edges as `id, source, target, type`, and the
/// optional fields left out entirely when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChatbotFlowData {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl ChatbotFlowData {
    /// Pretty-printed canonical JSON (two-space indent).
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Edges whose `source` or `target` does not name a node in this graph.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &FlowEdge> {
        let ids: AHashSet<&str> = self.nodes.iter().map(|node| node.id.as_str()).collect();
        self.edges.iter().filter(move |edge| {
            !ids.contains(edge.source.as_str()) || !ids.contains(edge.target.as_str())
        })
    }
}
