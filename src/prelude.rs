//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the chatflow crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let payload = std::fs::read_to_string("path/to/flow.json")?;
//!
//! let pipeline = FlowGraphPipeline::new();
//! let report = pipeline.process(&serde_json::Value::String(payload))?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```

// Pipeline and report
pub use crate::pipeline::FlowGraphPipeline;
pub use crate::report::{FlowReport, ReportFormatter};

// Flow model
pub use crate::flow::{ChatbotFlowData, FlowEdge, FlowNode, NodeKind, Point};

// Actions and configuration
pub use crate::action::{EmbedBuilderAction, InteractiveBuilderAction};
pub use crate::config::BuilderConfig;
pub use crate::host::{
    ActionResponse, ChatBody, ChatMessage, EventCall, EventEmitter, FileRegistry, HostEvent,
    HostUser, MemoryFileRegistry,
};

// Error types
pub use crate::error::{ActionError, ConfigError, HostError, PayloadError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
