//! The two builder actions the host can invoke.
//!
//! * [`InteractiveBuilderAction`] opens the locally served builder in an
//!   iframe, waits for the submitted flow and answers with its report.
//! * [`EmbedBuilderAction`] stores a CDN-backed builder page and attaches it
//!   to the conversation.

mod embed;
mod interactive;

pub use embed::{BUILDER_DIRECTORY, EmbedBuilderAction};
pub use interactive::InteractiveBuilderAction;

use crate::host::{EventEmitter, HostEvent};
use tracing::warn;

/// Emits `event` if the host gave us an emitter. Delivery failures are only logged.
fn emit_best_effort(emitter: Option<&dyn EventEmitter>, event: HostEvent) {
    if let Some(emitter) = emitter {
        if let Err(e) = emitter.emit(event) {
            warn!(error = %e, "failed to deliver host event");
        }
    }
}
