//! Tests for payload decoding and schema validation.
mod common;
use chatflow::flow::{NodeKind, parse_payload, parse_str};
use chatflow::prelude::*;
use common::*;
use serde_json::json;

fn assert_violation(result: std::result::Result<ChatbotFlowData, PayloadError>, expected_path: &str) {
    match result {
        Err(PayloadError::SchemaViolation { path, .. }) => assert_eq!(path, expected_path),
        other => panic!("Expected SchemaViolation at '{}', got {:?}", expected_path, other),
    }
}

#[test]
fn test_parses_object_payload() {
    let flow = parse_payload(&simple_flow_payload()).expect("Failed to parse payload");

    assert_eq!(flow.nodes.len(), 2);
    assert_eq!(flow.edges.len(), 1);
    assert_eq!(flow.nodes[0].id, "n1");
    assert_eq!(flow.nodes[0].kind, NodeKind::Start);
    assert_eq!(flow.nodes[1].position, Point::new(100.0, 50.0));
    assert_eq!(
        flow.nodes[1].kind,
        NodeKind::TextMessage {
            channel: "sms".to_string(),
            message: "Hi".to_string(),
        }
    );
    assert_eq!(flow.edges[0].source, "n1");
    assert_eq!(flow.edges[0].target, "n2");
    assert_eq!(flow.timestamp, None);
    assert_eq!(flow.metadata, None);
}

#[test]
fn test_string_payload_matches_object_payload() {
    let from_string = parse_payload(&json!(SIMPLE_FLOW_JSON)).unwrap();
    let from_object = parse_payload(&simple_flow_payload()).unwrap();
    assert_eq!(from_string, from_object);
    assert_eq!(parse_str(SIMPLE_FLOW_JSON).unwrap(), from_object);
}

#[test]
fn test_malformed_json_is_reported() {
    let result = parse_payload(&json!("{not json"));
    assert!(matches!(result, Err(PayloadError::MalformedPayload(_))));
}

#[test]
fn test_non_object_non_string_payloads_are_unsupported() {
    for raw in [json!(42), json!(true), json!(null), json!([1, 2])] {
        match parse_payload(&raw) {
            Err(PayloadError::UnsupportedPayloadType(kind)) => assert!(!kind.is_empty()),
            other => panic!("Expected UnsupportedPayloadType for {}, got {:?}", raw, other),
        }
    }
}

#[test]
fn test_json_text_of_non_object_is_schema_violation() {
    assert_violation(parse_str("[1, 2, 3]"), "payload");
}

#[test]
fn test_missing_node_id() {
    let result = parse_payload(&json!({
        "nodes": [{"type": "start", "position": {"x": 0, "y": 0}}],
        "edges": []
    }));
    assert_violation(result, "nodes[0].id");
}

#[test]
fn test_missing_node_data() {
    let result = parse_payload(&json!({
        "nodes": [{"id": "a", "type": "start", "position": {"x": 0, "y": 0}}],
        "edges": []
    }));
    assert_violation(result, "nodes[0].data");

    let result = parse_payload(&json!({
        "nodes": [{"id": "a", "type": "start", "position": {"x": 0, "y": 0}, "data": null}],
        "edges": []
    }));
    assert_violation(result, "nodes[0].data");
}

#[test]
fn test_missing_collections() {
    assert_violation(parse_payload(&json!({"edges": []})), "nodes");
    assert_violation(parse_payload(&json!({"nodes": []})), "edges");
    assert_violation(parse_payload(&json!({"nodes": {}, "edges": []})), "nodes");
}

#[test]
fn test_wrong_primitive_types() {
    assert_violation(
        parse_payload(&json!({
            "nodes": [{"id": 7, "type": "start", "position": {"x": 0, "y": 0}}],
            "edges": []
        })),
        "nodes[0].id",
    );
    assert_violation(
        parse_payload(&json!({
            "nodes": [{"id": "a", "type": "start", "position": {"x": "0", "y": 0}}],
            "edges": []
        })),
        "nodes[0].position.x",
    );
    assert_violation(
        parse_payload(&json!({
            "nodes": [],
            "edges": [{"id": "e1", "source": "a", "target": 3}]
        })),
        "edges[0].target",
    );
    assert_violation(
        parse_payload(&json!({
            "nodes": [{"id": "a", "type": "start", "position": {"x": 0, "y": 0}, "data": []}],
            "edges": []
        })),
        "nodes[0].data",
    );
}

#[test]
fn test_unknown_fields_on_strict_paths_are_rejected() {
    assert_violation(
        parse_payload(&json!({"nodes": [], "edges": [], "viewport": {"zoom": 1}})),
        "viewport",
    );
    assert_violation(
        parse_payload(&json!({
            "nodes": [{"id": "a", "type": "start", "position": {"x": 0, "y": 0, "z": 1}}],
            "edges": []
        })),
        "nodes[0].position.z",
    );
}

#[test]
fn test_open_maps_are_preserved() {
    let flow = parse_payload(&complex_flow_payload()).unwrap();

    let greet = flow.node("greet").unwrap();
    assert_eq!(greet.data.get("delayMs"), Some(&json!(250)));
    let keys: Vec<_> = greet.data.keys().cloned().collect();
    assert_eq!(keys, vec!["channel", "message", "delayMs"]);

    let metadata = flow.metadata.as_ref().unwrap();
    assert_eq!(metadata.get("author"), Some(&json!("qa")));
    assert_eq!(flow.timestamp, Some(1718000000000));
}

#[test]
fn test_unrecognized_node_type_is_generic() {
    let flow = parse_payload(&complex_flow_payload()).unwrap();
    let hook = flow.node("hook").unwrap();
    assert_eq!(hook.node_type, "webhook");
    assert_eq!(hook.kind, NodeKind::Generic);
}

#[test]
fn test_typed_data_defaults() {
    let flow = parse_payload(&json!({
        "nodes": [
            {"id": "m", "type": "textMessage", "position": {"x": 0, "y": 0}, "data": {}},
            {"id": "c", "type": "conditionalPath", "position": {"x": 0, "y": 0}, "data": {}}
        ],
        "edges": [{"id": "e1", "source": "m", "target": "c"}]
    }))
    .unwrap();

    assert_eq!(
        flow.nodes[0].kind,
        NodeKind::TextMessage {
            channel: "sms".to_string(),
            message: String::new(),
        }
    );
    assert_eq!(
        flow.nodes[1].kind,
        NodeKind::ConditionalPath {
            condition: String::new(),
        }
    );
    assert!(flow.nodes[1].data.is_empty());
    assert_eq!(flow.edges[0].edge_type, "default");
}

#[test]
fn test_empty_and_duplicate_ids_are_rejected() {
    assert_violation(
        parse_payload(&json!({
            "nodes": [{"id": "", "type": "start", "position": {"x": 0, "y": 0}}],
            "edges": []
        })),
        "nodes[0].id",
    );
    assert_violation(
        parse_payload(&json!({
            "nodes": [
                {"id": "a", "type": "start", "position": {"x": 0, "y": 0}, "data": {}},
                {"id": "a", "type": "end", "position": {"x": 1, "y": 0}, "data": {}}
            ],
            "edges": []
        })),
        "nodes[1].id",
    );
}

#[test]
fn test_node_and_edge_may_share_an_id() {
    let flow = parse_payload(&json!({
        "nodes": [{"id": "x", "type": "start", "position": {"x": 0, "y": 0}, "data": {}}],
        "edges": [{"id": "x", "source": "x", "target": "x"}]
    }));
    assert!(flow.is_ok());
}

#[test]
fn test_dangling_edges_are_accepted() {
    let flow = parse_payload(&json!({
        "nodes": [{"id": "a", "type": "start", "position": {"x": 0, "y": 0}, "data": {}}],
        "edges": [{"id": "e1", "source": "a", "target": "ghost"}]
    }))
    .expect("Dangling edges must not fail validation");
    assert_eq!(flow.dangling_edges().count(), 1);
}

#[test]
fn test_canonical_json_round_trip() {
    let original = parse_payload(&complex_flow_payload()).unwrap();
    let encoded = original.to_canonical_json().unwrap();
    let decoded = parse_str(&encoded).unwrap();
    assert_eq!(decoded, original);

    let simple = parse_payload(&simple_flow_payload()).unwrap();
    let decoded = parse_str(&simple.to_canonical_json().unwrap()).unwrap();
    assert_eq!(decoded.timestamp, None);
    assert_eq!(decoded.metadata, None);
    assert_eq!(decoded, simple);
}

#[test]
fn test_canonical_field_order() {
    let flow = parse_payload(&json!({
        "nodes": [{"data": {"b": 1, "a": 2}, "position": {"y": 5, "x": 4}, "type": "start", "id": "s"}],
        "edges": [{"type": "step", "target": "s", "source": "s", "id": "e"}]
    }))
    .unwrap();
    let encoded = serde_json::to_string(&flow).unwrap();
    assert_eq!(
        encoded,
        r#"{"nodes":[{"id":"s","type":"start","position":{"x":4.0,"y":5.0},"data":{"b":1,"a":2}}],"edges":[{"id":"e","source":"s","target":"s","type":"step"}]}"#
    );
}
