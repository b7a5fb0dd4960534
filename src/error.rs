use thiserror::Error;

/// Errors that can occur while turning a raw builder payload into a `ChatbotFlowData`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("Failed to parse flow payload as JSON: {0}")]
    MalformedPayload(String),

    #[error("Unsupported payload type '{0}': expected a JSON object or a JSON-encoded string")]
    UnsupportedPayloadType(String),

    #[error("Schema violation at '{path}': {message}")]
    SchemaViolation { path: String, message: String },
}

impl PayloadError {
    pub(crate) fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        PayloadError::SchemaViolation {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by the host seams (event delivery, interactive calls, file storage).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Failed to deliver host event: {0}")]
    EventDelivery(String),

    #[error("File registry failure: {0}")]
    Storage(String),

    #[error("The conversation has no messages to attach the builder to")]
    EmptyConversation,
}

/// Errors that can occur when loading a `BuilderConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid builder config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Any failure that aborts a builder action.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Host(#[from] HostError),
}
