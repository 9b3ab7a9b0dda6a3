//! Assistant backend seam.

use async_trait::async_trait;
use learnsphere_core::prelude::*;

/// Conversation operations behind the assistant service
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Produce a reply to one user message
    async fn send_message(&self, request: &SendMessageRequest) -> Result<AssistantResponse>;

    /// Start an empty session owned by `user_id`
    async fn create_session(&self, title: &str, user_id: &str) -> Result<ChatSession>;

    /// Sessions visible to `user_id`, newest first
    async fn sessions(&self, user_id: &str) -> Result<Vec<ChatSession>>;
}
