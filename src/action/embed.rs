use super::emit_best_effort;
use crate::config::BuilderConfig;
use crate::error::HostError;
use crate::host::{ChatBody, EventEmitter, FileMeta, FileRegistry, HostEvent, HostUser};
use crate::html;
use tracing::{debug, error, info};

/// Registry directory that holds every generated builder page.
pub const BUILDER_DIRECTORY: &str = "chatbot_builder";

/// Stores the CDN builder page for a user and attaches it to the conversation.
pub struct EmbedBuilderAction<R: FileRegistry> {
    config: BuilderConfig,
    registry: R,
}

impl<R: FileRegistry> EmbedBuilderAction<R> {
    pub fn new(config: BuilderConfig, registry: R) -> Self {
        Self { config, registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Runs the action and returns the updated conversation body.
    ///
    /// `now_ms` is the wall-clock time in epoch milliseconds; it prefixes the
    /// stored file name. On failure the error is appended to the last message
    /// instead of the embed tag.
    pub fn run(
        &self,
        mut body: ChatBody,
        user: &HostUser,
        emitter: Option<&dyn EventEmitter>,
        now_ms: u64,
    ) -> ChatBody {
        emit_best_effort(
            emitter,
            HostEvent::status("Loading Chatbot Flow Builder...", Some(false)),
        );

        match self.attach(&mut body, user, now_ms) {
            Ok(file_id) => {
                info!(user = %user.id, file_id = %file_id, "chatbot builder page attached");
                emit_best_effort(
                    emitter,
                    HostEvent::status("✅ Chatbot Flow Builder loaded successfully!", Some(true)),
                );
            }
            Err(e) => {
                error!(user = %user.id, error = %e, "failed to attach chatbot builder page");
                if let Some(message) = body.last_message_mut() {
                    message.content.push_str(&format!(
                        "\n\nError: Error loading Chatbot Flow Builder: {}",
                        e
                    ));
                }
                if self.config.show_status {
                    emit_best_effort(
                        emitter,
                        HostEvent::status("Error loading Chatbot Flow Builder", Some(true)),
                    );
                }
            }
        }

        body
    }

    fn attach(&self, body: &mut ChatBody, user: &HostUser, now_ms: u64) -> Result<String, HostError> {
        if body.messages.is_empty() {
            return Err(HostError::EmptyConversation);
        }

        let page = html::cdn_page(&self.config.assets);
        let file_id = self.store_page(&user.id, &page, now_ms)?;

        let message = body.last_message_mut().ok_or(HostError::EmptyConversation)?;
        message.content.push_str("\n\n");
        message.content.push_str(&html::embed_tag(&file_id));
        Ok(file_id)
    }

    /// Writes `page` for `user_id` and returns the registry id.
    ///
    /// A user keeps a single builder page: if one is already registered under
    /// the configured file name, its content is overwritten and its id reused.
    pub fn store_page(&self, user_id: &str, page: &str, now_ms: u64) -> Result<String, HostError> {
        let user_dir = format!("{}/{}/", BUILDER_DIRECTORY, user_id);
        let suffix = format!("_{}", self.config.html_filename);

        let existing = self
            .registry
            .files_for_user(user_id)?
            .into_iter()
            .find(|record| record.filename.starts_with(&user_dir) && record.filename.ends_with(&suffix));

        if let Some(record) = existing {
            debug!(path = %record.meta.path, "overwriting existing builder page");
            self.registry.write_content(&record.meta.path, page)?;
            return Ok(record.id);
        }

        let name = format!("{}_{}", now_ms, self.config.html_filename);
        let path = format!("uploads/{}{}", user_dir, name);
        debug!(path = %path, "creating builder page");

        let size = self.registry.write_content(&path, page)?;
        let record = self.registry.insert(
            user_id,
            &format!("{}{}", user_dir, name),
            FileMeta {
                source: path.clone(),
                title: "Chatbot Flow Builder".to_string(),
                content_type: "text/html".to_string(),
                size,
                path,
            },
        )?;
        Ok(record.id)
    }
}
