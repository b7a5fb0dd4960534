//! Common test utilities: payload fixtures and recording host doubles.
use chatflow::prelude::*;
use chatflow::host::InputRequest;
use serde_json::{Value, json};
use std::sync::Mutex;

/// The two-node scenario: `start` -> `textMessage`.
#[allow(dead_code)]
pub const SIMPLE_FLOW_JSON: &str = r#"{"nodes":[{"id":"n1","type":"start","position":{"x":0,"y":0},"data":{}},{"id":"n2","type":"textMessage","position":{"x":100,"y":50},"data":{"channel":"sms","message":"Hi"}}],"edges":[{"id":"e1","source":"n1","target":"n2","type":"default"}]}"#;

#[allow(dead_code)]
pub fn simple_flow_payload() -> Value {
    serde_json::from_str(SIMPLE_FLOW_JSON).expect("fixture is valid JSON")
}

/// A flow using every known node type, a custom node type, optional fields
/// and extra data keys.
#[allow(dead_code)]
pub fn complex_flow_payload() -> Value {
    json!({
        "nodes": [
            {"id": "start", "type": "start", "position": {"x": 0, "y": 0}, "data": {"label": "Begin"}},
            {"id": "greet", "type": "textMessage", "position": {"x": 200.5, "y": -40},
             "data": {"channel": "whatsapp", "message": "Welcome!", "delayMs": 250}},
            {"id": "check", "type": "conditionalPath", "position": {"x": 400, "y": 0},
             "data": {"condition": "user.replied"}},
            {"id": "hook", "type": "webhook", "position": {"x": 600, "y": 120},
             "data": {"url": "https://example.test/hook"}},
            {"id": "finish", "type": "end", "position": {"x": 800, "y": 0}, "data": {}}
        ],
        "edges": [
            {"id": "e1", "source": "start", "target": "greet", "type": "default"},
            {"id": "e2", "source": "greet", "target": "check"},
            {"id": "e3", "source": "check", "target": "hook", "type": "smoothstep"},
            {"id": "e4", "source": "hook", "target": "finish", "type": "default"}
        ],
        "timestamp": 1718000000000_i64,
        "metadata": {"author": "qa", "version": 3}
    })
}

#[allow(dead_code)]
pub fn empty_flow_payload() -> Value {
    json!({"nodes": [], "edges": []})
}

/// Records every event it is handed; optionally fails every delivery.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingEmitter {
    pub events: Mutex<Vec<HostEvent>>,
    pub fail: bool,
}

#[allow(dead_code)]
impl RecordingEmitter {
    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventEmitter for RecordingEmitter {
    fn emit(&self, event: HostEvent) -> std::result::Result<(), HostError> {
        if self.fail {
            return Err(HostError::EventDelivery("socket closed".to_string()));
        }
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Answers every input request with a fixed result.
#[allow(dead_code)]
pub struct ScriptedCall {
    pub answer: std::result::Result<Option<Value>, HostError>,
    pub requests: Mutex<Vec<InputRequest>>,
}

#[allow(dead_code)]
impl ScriptedCall {
    pub fn answering(answer: Option<Value>) -> Self {
        Self {
            answer: Ok(answer),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: HostError) -> Self {
        Self {
            answer: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl EventCall for ScriptedCall {
    fn call(&self, request: InputRequest) -> std::result::Result<Option<Value>, HostError> {
        self.requests.lock().unwrap().push(request);
        self.answer.clone()
    }
}

#[allow(dead_code)]
pub fn conversation(content: &str) -> ChatBody {
    ChatBody {
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: content.to_string(),
        }],
    }
}

#[allow(dead_code)]
pub fn user(id: &str) -> HostUser {
    HostUser {
        id: id.to_string(),
        name: Some("Ada".to_string()),
    }
}
