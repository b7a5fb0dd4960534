//! Seams to the chat host: events, interactive calls, conversation types and
//! file storage. The host provides the implementations; the actions only see
//! these traits.

mod events;
mod files;

pub use events::*;
pub use files::*;
