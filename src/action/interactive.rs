use super::emit_best_effort;
use crate::config::BuilderConfig;
use crate::error::ActionError;
use crate::host::{
    ActionResponse, EventCall, EventEmitter, HostEvent, HostUser, InputRequest, MessageFormat,
    NotificationLevel,
};
use crate::html;
use crate::pipeline::FlowGraphPipeline;
use serde_json::Value;
use tracing::{debug, error, info};

const DISABLED_NOTICE: &str = "Chatbot builder is currently disabled.";
const CANCELLED_NOTICE: &str = "Chatbot builder was cancelled.";
const NO_CALL_FALLBACK: &str = "Chatbot Builder launched. Please use a host version that supports interactive actions.";

/// Opens the builder in an iframe and turns the submitted flow into a report.
#[derive(Debug, Clone, Default)]
pub struct InteractiveBuilderAction {
    config: BuilderConfig,
    pipeline: FlowGraphPipeline,
}

impl InteractiveBuilderAction {
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            config,
            pipeline: FlowGraphPipeline::new(),
        }
    }

    /// Text for the host's action button.
    pub fn button_label(&self) -> &str {
        &self.config.button_label
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Runs the action end to end. Failures are reported to the user through
    /// an error notification and the returned content; this never errors.
    pub fn run(
        &self,
        user: Option<&HostUser>,
        emitter: Option<&dyn EventEmitter>,
        call: Option<&dyn EventCall>,
    ) -> ActionResponse {
        if !self.config.enable_builder {
            return ActionResponse::plain(DISABLED_NOTICE);
        }

        if self.config.debug_mode {
            let name = user.and_then(|u| u.name.as_deref()).unwrap_or("Unknown");
            info!(user = name, "chatbot builder action triggered");
        }

        match self.try_run(emitter, call) {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "chatbot builder action failed");
                emit_best_effort(
                    emitter,
                    HostEvent::Notification {
                        level: NotificationLevel::Error,
                        content: format!("Chatbot builder failed: {}", e),
                    },
                );
                ActionResponse::markdown(format!(
                    "❌ Chatbot builder encountered an error: {}",
                    e
                ))
            }
        }
    }

    fn try_run(
        &self,
        emitter: Option<&dyn EventEmitter>,
        call: Option<&dyn EventCall>,
    ) -> Result<ActionResponse, ActionError> {
        let builder_html = html::builder_interface(&self.config.chatbot_builder_url);

        if let Some(emitter) = emitter {
            emitter.emit(HostEvent::status("Launching Chatbot Builder...", None))?;
            emitter.emit(HostEvent::Message {
                content: builder_html.clone(),
                format: MessageFormat::Html,
            })?;
        }

        let Some(call) = call else {
            return Ok(ActionResponse::markdown(NO_CALL_FALLBACK));
        };

        let submitted = call.call(InputRequest {
            title: "Chatbot Flow Builder".to_string(),
            message: "Design your chatbot flow using the interactive builder below:".to_string(),
            placeholder: "Click 'Save' in the builder to save your flow...".to_string(),
            html: builder_html,
        })?;

        match submitted {
            Some(payload) if !is_dismissal(&payload) => {
                let report = self.pipeline.process(&payload)?;
                debug!(bytes = report.len(), "rendered flow report");
                Ok(ActionResponse::markdown(report))
            }
            _ => Ok(ActionResponse::plain(CANCELLED_NOTICE)),
        }
    }
}

/// The host reports a dismissed dialog as nothing, `null` or an empty string.
fn is_dismissal(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
