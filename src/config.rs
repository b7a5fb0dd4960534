use crate::error::ConfigError;
use crate::html::CdnAssets;
use serde::{Deserialize, Serialize};
use std::fs;

/// User-tunable settings of the builder actions.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Where the interactive builder application is served from.
    pub chatbot_builder_url: String,
    /// When `false`, the interactive action answers with a notice and does nothing else.
    pub enable_builder: bool,
    /// Log who triggered the interactive action.
    pub debug_mode: bool,
    /// Emit a status event when the embed action fails.
    pub show_status: bool,
    /// Base name of the generated HTML document; stored with a timestamp prefix.
    pub html_filename: String,
    /// Label the host shows on the action button that launches the interactive
    /// builder. Read through [`InteractiveBuilderAction::button_label`].
    ///
    /// [`InteractiveBuilderAction::button_label`]: crate::action::InteractiveBuilderAction::button_label
    pub button_label: String,
    /// Stylesheet and script of the CDN-hosted builder.
    pub assets: CdnAssets,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            chatbot_builder_url: "http://localhost:5173".to_string(),
            enable_builder: true,
            debug_mode: false,
            show_status: true,
            html_filename: "chatbot_builder.html".to_string(),
            button_label: "🎨 Open Flow Builder".to_string(),
            assets: CdnAssets::default(),
        }
    }
}

impl BuilderConfig {
    /// Load a config from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
