use super::model::*;
use crate::error::PayloadError;
use ahash::AHashSet;
use serde_json::{Map, Value};
use tracing::debug;

const FLOW_FIELDS: &[&str] = &["nodes", "edges", "timestamp", "metadata"];
const POSITION_FIELDS: &[&str] = &["x", "y"];

/// Decodes and validates a builder payload.
///
/// Accepts either a JSON object already shaped like `ChatbotFlowData` or a
/// string holding its JSON encoding. Any other JSON value is rejected with
/// `UnsupportedPayloadType`.
pub fn parse_payload(raw: &Value) -> Result<ChatbotFlowData, PayloadError> {
    match raw {
        Value::String(text) => parse_str(text),
        Value::Object(map) => parse_flow(map),
        other => Err(PayloadError::UnsupportedPayloadType(
            json_kind(other).to_string(),
        )),
    }
}

/// Decodes a JSON-encoded payload and validates it.
///
/// Text that is not JSON is a `MalformedPayload`; JSON that is not an object
/// is a `SchemaViolation` on the payload root.
pub fn parse_str(text: &str) -> Result<ChatbotFlowData, PayloadError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| PayloadError::MalformedPayload(e.to_string()))?;
    match value {
        Value::Object(map) => parse_flow(&map),
        other => Err(PayloadError::schema(
            "payload",
            format!("expected an object, found {}", json_kind(&other)),
        )),
    }
}

fn parse_flow(map: &Map<String, Value>) -> Result<ChatbotFlowData, PayloadError> {
    reject_unknown_fields(map, FLOW_FIELDS, "")?;

    let nodes = expect_array(required(map, "nodes", "")?, "nodes")?
        .iter()
        .enumerate()
        .map(|(i, value)| parse_node(value, &format!("nodes[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;
    ensure_unique_ids(nodes.iter().map(|n| n.id.as_str()), "nodes", "node")?;

    let edges = expect_array(required(map, "edges", "")?, "edges")?
        .iter()
        .enumerate()
        .map(|(i, value)| parse_edge(value, &format!("edges[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;
    ensure_unique_ids(edges.iter().map(|e| e.id.as_str()), "edges", "edge")?;

    let timestamp = optional(map, "timestamp")
        .map(|value| {
            integral(value).ok_or_else(|| {
                PayloadError::schema(
                    "timestamp",
                    format!(
                        "expected an integer (epoch milliseconds), found {}",
                        describe(value)
                    ),
                )
            })
        })
        .transpose()?;

    let metadata = optional(map, "metadata")
        .map(|value| expect_object(value, "metadata").cloned())
        .transpose()?;

    Ok(ChatbotFlowData {
        nodes,
        edges,
        timestamp,
        metadata,
    })
}

fn parse_node(value: &Value, path: &str) -> Result<FlowNode, PayloadError> {
    let map = expect_object(value, path)?;
    let id = expect_id(required(map, "id", path)?, &join(path, "id"))?;
    let node_type = expect_id(required(map, "type", path)?, &join(path, "type"))?;
    let position = parse_point(required(map, "position", path)?, &join(path, "position"))?;

    let data_path = join(path, "data");
    let data = expect_object(required(map, "data", path)?, &data_path)?.clone();
    check_typed_data(node_type, &data, &data_path)?;

    log_ignored_fields(map, &["id", "type", "position", "data"], path);
    Ok(FlowNode::new(id, node_type, position, data))
}

fn parse_edge(value: &Value, path: &str) -> Result<FlowEdge, PayloadError> {
    let map = expect_object(value, path)?;
    let id = expect_id(required(map, "id", path)?, &join(path, "id"))?;
    let source = expect_str(required(map, "source", path)?, &join(path, "source"))?;
    let target = expect_str(required(map, "target", path)?, &join(path, "target"))?;
    let edge_type = match map.get("type") {
        Some(value) => expect_str(value, &join(path, "type"))?,
        None => DEFAULT_EDGE_TYPE,
    };

    log_ignored_fields(map, &["id", "source", "target", "type"], path);
    Ok(FlowEdge {
        edge_type: edge_type.to_string(),
        ..FlowEdge::new(id, source, target)
    })
}

fn parse_point(value: &Value, path: &str) -> Result<Point, PayloadError> {
    let map = expect_object(value, path)?;
    reject_unknown_fields(map, POSITION_FIELDS, path)?;
    let x = expect_coordinate(required(map, "x", path)?, &join(path, "x"))?;
    let y = expect_coordinate(required(map, "y", path)?, &join(path, "y"))?;
    Ok(Point::new(x, y))
}

/// The known fields of typed node data must be strings when present.
/// Missing or `null` fields fall back to their defaults in `NodeKind::from_data`.
fn check_typed_data(
    node_type: &str,
    data: &Map<String, Value>,
    data_path: &str,
) -> Result<(), PayloadError> {
    let typed_fields: &[&str] = match node_type {
        TEXT_MESSAGE_NODE => &["channel", "message"],
        CONDITIONAL_PATH_NODE => &["condition"],
        _ => &[],
    };
    for key in typed_fields {
        if let Some(value) = optional(data, key) {
            expect_str(value, &join(data_path, key))?;
        }
    }
    Ok(())
}

fn ensure_unique_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    collection: &str,
    entity: &str,
) -> Result<(), PayloadError> {
    let mut seen = AHashSet::new();
    for (i, id) in ids.enumerate() {
        if !seen.insert(id) {
            return Err(PayloadError::schema(
                format!("{}[{}].id", collection, i),
                format!("duplicate {} id '{}'", entity, id),
            ));
        }
    }
    Ok(())
}

// --- Field helpers ---

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn required<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<&'a Value, PayloadError> {
    map.get(key)
        .ok_or_else(|| PayloadError::schema(join(parent, key), "missing required field"))
}

/// Present and not `null`.
fn optional<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

fn reject_unknown_fields(
    map: &Map<String, Value>,
    allowed: &[&str],
    parent: &str,
) -> Result<(), PayloadError> {
    match map.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(PayloadError::schema(join(parent, key), "unknown field")),
        None => Ok(()),
    }
}

fn log_ignored_fields(map: &Map<String, Value>, known: &[&str], path: &str) {
    for key in map.keys().filter(|key| !known.contains(&key.as_str())) {
        debug!(field = %join(path, key), "ignoring editor-only field");
    }
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, PayloadError> {
    value.as_object().ok_or_else(|| mismatch(path, "an object", value))
}

fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, PayloadError> {
    value.as_array().ok_or_else(|| mismatch(path, "an array", value))
}

fn expect_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, PayloadError> {
    value.as_str().ok_or_else(|| mismatch(path, "a string", value))
}

fn expect_id<'a>(value: &'a Value, path: &str) -> Result<&'a str, PayloadError> {
    let id = expect_str(value, path)?;
    if id.is_empty() {
        return Err(PayloadError::schema(path, "must not be empty"));
    }
    Ok(id)
}

fn expect_coordinate(value: &Value, path: &str) -> Result<f64, PayloadError> {
    match value.as_f64() {
        Some(n) if n.is_finite() => Ok(n),
        Some(_) => Err(PayloadError::schema(path, "coordinate must be finite")),
        None => Err(mismatch(path, "a number", value)),
    }
}

/// Integers, or floats without a fractional part that fit in an `i64`.
fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64)
            .map(|n| n as i64)
    })
}

fn mismatch(path: &str, expected: &str, found: &Value) -> PayloadError {
    PayloadError::schema(
        path,
        format!("expected {}, found {}", expected, describe(found)),
    )
}

fn describe(value: &Value) -> String {
    match value {
        Value::Number(n) => format!("number {}", n),
        other => json_kind(other).to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
