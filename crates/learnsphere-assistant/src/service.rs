//! State-owning assistant service.
//!
//! Tracks the signed-in user's chat sessions, the open session, typing and
//! loading flags, the last error and the chat preferences (persisted as JSON
//! in injected storage).

use chrono::Utc;
use learnsphere_core::prelude::*;
use learnsphere_core::{MessageMetadata, load_json, store_json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::backend::AssistantBackend;
use crate::messages::{UNTITLED_SESSION, session_summary};

/// Reply appended when the backend fails to answer
pub const APOLOGY: &str = "Sorry, I can't reply to your message right now. Please try again later.";

/// Snapshot of the assistant state
#[derive(Debug, Clone)]
pub struct AssistantState {
    pub user_id: Option<String>,
    /// Newest first
    pub sessions: Vec<ChatSession>,
    pub current_session_id: Option<String>,
    pub is_loading: bool,
    pub is_typing: bool,
    pub error: Option<String>,
    pub preferences: ChatPreferences,
}

impl AssistantState {
    fn new(preferences: ChatPreferences) -> Self {
        Self {
            user_id: None,
            sessions: Vec::new(),
            current_session_id: None,
            is_loading: false,
            is_typing: false,
            error: None,
            preferences,
        }
    }

    pub fn current_session(&self) -> Option<&ChatSession> {
        let id = self.current_session_id.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    fn session_mut(&mut self, id: &str) -> Result<&mut ChatSession> {
        self.sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::not_found(format!("session {}", id)))
    }

    fn push_message(&mut self, session_id: &str, message: ChatMessage) -> Result<()> {
        let session = self.session_mut(session_id)?;
        session.messages.push(message);
        session.updated_at = Utc::now();
        Ok(())
    }
}

/// Chat sessions plus the commands that change them
pub struct AssistantService<S> {
    backend: Arc<dyn AssistantBackend>,
    storage: S,
    config: AssistantConfig,
    state: RwLock<AssistantState>,
}

impl<S: KeyValueStorage> AssistantService<S> {
    pub fn new(backend: Arc<dyn AssistantBackend>, storage: S, config: AssistantConfig) -> Self {
        let state = AssistantState::new(config.default_preferences.clone());
        Self {
            backend,
            storage,
            config,
            state: RwLock::new(state),
        }
    }

    // ==================== Queries ====================

    pub async fn snapshot(&self) -> AssistantState {
        self.state.read().await.clone()
    }

    pub async fn sessions(&self) -> Vec<ChatSession> {
        self.state.read().await.sessions.clone()
    }

    pub async fn current_session(&self) -> Option<ChatSession> {
        self.state.read().await.current_session().cloned()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn is_typing(&self) -> bool {
        self.state.read().await.is_typing
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn preferences(&self) -> ChatPreferences {
        self.state.read().await.preferences.clone()
    }

    // ==================== Commands ====================

    /// Switch to `user_id`, or sign out with `None`.
    ///
    /// Signing in restores stored preferences and loads the user's sessions;
    /// signing out drops every session.
    #[instrument(skip(self), name = "assistant_set_user")]
    pub async fn set_user(&self, user_id: Option<&str>) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.user_id = user_id.map(str::to_string);
            state.sessions.clear();
            state.current_session_id = None;
        }

        if user_id.is_some() {
            self.load_preferences().await;
            self.fetch_sessions().await?;
        }
        Ok(())
    }

    /// Reload the user's sessions. Does nothing when nobody is signed in.
    #[instrument(skip(self), name = "assistant_fetch_sessions")]
    pub async fn fetch_sessions(&self) -> Result<()> {
        let Some(user_id) = self.state.read().await.user_id.clone() else {
            return Ok(());
        };

        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
        }

        match self.backend.sessions(&user_id).await {
            Ok(sessions) => {
                log::info!("Loaded {} chat sessions", sessions.len());
                let mut state = self.state.write().await;
                let current_kept = state
                    .current_session_id
                    .as_deref()
                    .is_some_and(|id| sessions.iter().any(|s| s.id == id));
                if !current_kept {
                    state.current_session_id = None;
                }
                state.sessions = sessions;
                state.is_loading = false;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to load sessions", e).await),
        }
    }

    /// Start a session and make it current.
    ///
    /// Without a title it is called "New conversation" plus the local
    /// creation time.
    #[instrument(skip(self), name = "assistant_create_session")]
    pub async fn create_session(&self, title: Option<&str>) -> Result<ChatSession> {
        let user_id = self.require_user().await?;
        let title = match title {
            Some(title) => title.to_string(),
            None => format!(
                "{} {}",
                UNTITLED_SESSION,
                Utc::now().format("%Y-%m-%d %H:%M:%S")
            ),
        };

        match self.backend.create_session(&title, &user_id).await {
            Ok(session) => {
                log::debug!("Created chat session {}", session.id);
                let mut state = self.state.write().await;
                state.sessions.insert(0, session.clone());
                state.current_session_id = Some(session.id.clone());
                Ok(session)
            }
            Err(e) => Err(self.fail("Failed to create session", e).await),
        }
    }

    /// Remove a session. If it was current, the first remaining session
    /// becomes current.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|s| s.id != session_id);
        if state.sessions.len() == before {
            return Err(Error::not_found(format!("session {}", session_id)));
        }

        if state.current_session_id.as_deref() == Some(session_id) {
            state.current_session_id = state.sessions.first().map(|s| s.id.clone());
        }
        Ok(())
    }

    /// Open a loaded session, or clear the selection
    pub async fn set_current_session(&self, session_id: Option<&str>) -> Result<()> {
        let mut state = self.state.write().await;
        let Some(id) = session_id else {
            state.current_session_id = None;
            return Ok(());
        };

        if !state.sessions.iter().any(|s| s.id == id) {
            return Err(Error::not_found(format!("session {}", id)));
        }
        state.current_session_id = Some(id.to_string());
        Ok(())
    }

    /// Send one message and append the reply.
    ///
    /// Without a session id a new session is created first. The first
    /// exchange of a session renames it after the question. A backend
    /// failure appends an apology flagged as an error and is returned to
    /// the caller.
    #[instrument(skip(self, request), name = "assistant_send_message")]
    pub async fn send_message(&self, mut request: SendMessageRequest) -> Result<ChatMessage> {
        let session_id = match request.session_id.clone() {
            Some(id) => id,
            None => self.create_session(None).await?.id,
        };
        request.session_id = Some(session_id.clone());

        let question = ChatMessage::user(request.content.clone());
        let first_exchange = {
            let mut state = self.state.write().await;
            let first = state.session_mut(&session_id)?.messages.is_empty();
            state.push_message(&session_id, question.clone())?;
            state.is_typing = true;
            first
        };

        let outcome = self.backend.send_message(&request).await;

        let mut state = self.state.write().await;
        state.is_typing = false;
        match outcome {
            Ok(response) => {
                let reply = ChatMessage::assistant(
                    response.content,
                    Some(MessageMetadata {
                        tokens: Some(response.tokens),
                        model: Some(response.model),
                        suggestions: response.suggestions,
                        references: response.references,
                        ..MessageMetadata::default()
                    }),
                );
                state.push_message(&session_id, reply.clone())?;
                if first_exchange {
                    state.session_mut(&session_id)?.title = session_summary(&[question]);
                }
                Ok(reply)
            }
            Err(e) => {
                log::warn!("Assistant failed to reply: {}", e);
                let apology = ChatMessage::assistant(
                    APOLOGY,
                    Some(MessageMetadata {
                        error: true,
                        ..MessageMetadata::default()
                    }),
                );
                state.push_message(&session_id, apology)?;
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Merge and persist preferences; returns the merged value
    pub async fn update_preferences(&self, update: PreferencesUpdate) -> Result<ChatPreferences> {
        let preferences = {
            let mut state = self.state.write().await;
            state.preferences.merge(update);
            state.preferences.clone()
        };
        store_json(
            &self.storage,
            &self.config.preferences_storage_key,
            &preferences,
        )?;
        Ok(preferences)
    }

    /// Merge stored preferences into the current ones.
    ///
    /// Stored values may be partial. Unreadable or malformed values are
    /// logged and ignored.
    pub async fn load_preferences(&self) -> ChatPreferences {
        let key = &self.config.preferences_storage_key;
        let mut state = self.state.write().await;
        match load_json::<PreferencesUpdate, _>(&self.storage, key) {
            Ok(Some(stored)) => state.preferences.merge(stored),
            Ok(None) => {}
            Err(e) => log::warn!("Ignoring stored chat preferences: {}", e),
        }
        state.preferences.clone()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    async fn require_user(&self) -> Result<String> {
        let user_id = self.state.read().await.user_id.clone();
        match user_id {
            Some(id) => Ok(id),
            None => {
                let e = Error::unauthenticated("Not signed in");
                self.state.write().await.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn fail(&self, context: &str, error: Error) -> Error {
        log::warn!("{}: {}", context, error);
        let mut state = self.state.write().await;
        state.is_loading = false;
        state.error = Some(error.to_string());
        error
    }
}
