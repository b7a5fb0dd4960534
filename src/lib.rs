//! # chatflow - Chatbot Flow Builder Integration
//!
//! **chatflow** is the host-side half of a graphical chatbot flow builder. The
//! builder itself is an external single-page application; this crate validates
//! what it submits, renders it into a readable markdown report, and provides
//! the two host actions that open the builder.
//!
//! ## Core Workflow
//!
//! 1.  **Receive a Payload**: The host hands over whatever the builder submitted,
//!     either as a JSON object or as a JSON-encoded string.
//! 2.  **Validate**: `FlowGraphPipeline::parse_payload` checks it field by field
//!     and produces an immutable `ChatbotFlowData`. Unknown node types are kept
//!     and rendered generically.
//! 3.  **Render**: `FlowGraphPipeline::render_report` turns the graph into a
//!     deterministic markdown report ending in the canonical JSON encoding.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatflow::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let payload = json!({
//!         "nodes": [
//!             {"id": "n1", "type": "start", "position": {"x": 0, "y": 0}, "data": {}},
//!             {"id": "n2", "type": "textMessage", "position": {"x": 100, "y": 50},
//!              "data": {"channel": "sms", "message": "Hi"}}
//!         ],
//!         "edges": [{"id": "e1", "source": "n1", "target": "n2", "type": "default"}]
//!     });
//!
//!     let pipeline = FlowGraphPipeline::new();
//!     let graph = pipeline.parse_payload(&payload)?;
//!     println!("{}", pipeline.render_report(&graph));
//!     Ok(())
//! }
//! ```
//!
//! ## Host Actions
//!
//! The [`action`] module wires the pipeline to the host through the traits in
//! [`host`]. Neither action installs a logging subscriber; they emit `tracing`
//! events and leave collection to the embedding application.

pub mod action;
pub mod config;
pub mod error;
pub mod flow;
pub mod host;
pub mod html;
pub mod pipeline;
pub mod prelude;
pub mod report;
