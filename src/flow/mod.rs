//! The flow-graph data model exchanged with the external builder, and the
//! boundary validation that produces it.

pub mod model;
pub mod parsing;

pub use model::*;
pub use parsing::{parse_payload, parse_str};
