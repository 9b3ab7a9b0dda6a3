//! # Study Assistant
//!
//! Chat sessions with a study assistant, quick prompt templates and message
//! helpers.
//!
//! - [`AssistantBackend`]: reply generation and session storage
//! - [`ScriptedAssistant`]: offline backend answering from fixed topics
//! - [`AssistantService`]: sessions, typing state and preferences
//! - [`quick_prompts`]: built-in prompt templates
//! - [`format_message_time`] and [`session_summary`] for display
//!
//! ```
//! use learnsphere_assistant::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let config = AssistantConfig::default();
//! let backend = Arc::new(ScriptedAssistant::new(config.clone()));
//! let assistant = AssistantService::new(backend, MemoryStorage::new(), config);
//!
//! assistant.set_user(Some("1")).await?;
//! let reply = assistant
//!     .send_message(SendMessageRequest::new("What is machine learning?"))
//!     .await?;
//! assert!(reply.content.contains("Supervised learning"));
//!
//! let session = assistant.current_session().await.expect("session created");
//! assert_eq!(session.title, "What is machine learning?");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod messages;
pub mod prompts;
pub mod scripted;
pub mod service;

pub use backend::AssistantBackend;
pub use messages::{SUMMARY_LENGTH, UNTITLED_SESSION, format_message_time, session_summary};
pub use prompts::{find_prompt, prompts_in, quick_prompts};
pub use scripted::{ScriptedAssistant, estimate_tokens};
pub use service::{APOLOGY, AssistantService, AssistantState};

pub mod prelude {
    pub use crate::backend::AssistantBackend;
    pub use crate::messages::{format_message_time, session_summary};
    pub use crate::prompts::quick_prompts;
    pub use crate::scripted::ScriptedAssistant;
    pub use crate::service::{AssistantService, AssistantState};
    pub use learnsphere_core::prelude::*;
}
