//! Composition root wiring every service from one [`AppConfig`].

use learnsphere_assistant::{AssistantService, ScriptedAssistant};
use learnsphere_auth::{AuthService, MockAuthBackend};
use learnsphere_core::prelude::*;
use learnsphere_store::{DocumentService, InMemoryDocumentRepository, SimulatedLatency};
use std::sync::Arc;
use tracing::instrument;

/// Storage shared by the auth token and the chat preferences
pub type SharedStorage = Arc<dyn KeyValueStorage>;

/// The whole application: documents, auth and the study assistant
pub struct LearnSphere {
    config: AppConfig,
    storage: SharedStorage,
    documents: DocumentService,
    auth: AuthService<SharedStorage>,
    assistant: AssistantService<SharedStorage>,
}

impl LearnSphere {
    /// Build over fresh in-memory storage
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_storage(config, Arc::new(MemoryStorage::new()))
    }

    /// Build over caller-provided storage (e.g. to restore a session)
    pub fn with_storage(config: AppConfig, storage: SharedStorage) -> Result<Self> {
        config.validate()?;

        let repository = SimulatedLatency::new(
            InMemoryDocumentRepository::seeded(config.documents.clone()),
            config.latency.clone(),
        );
        let documents = DocumentService::new(Arc::new(repository), config.documents.clone());

        let auth = AuthService::new(
            Arc::new(MockAuthBackend::new(config.auth.clone())),
            Arc::clone(&storage),
            config.auth.clone(),
        );

        let scripted = ScriptedAssistant::new(config.assistant.clone())
            .with_latency(config.latency.clone());
        let assistant = AssistantService::new(
            Arc::new(scripted),
            Arc::clone(&storage),
            config.assistant.clone(),
        );

        log::debug!("LearnSphere assembled (profile: {})", config.profile);
        Ok(Self {
            config,
            storage,
            documents,
            auth,
            assistant,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    pub fn documents(&self) -> &DocumentService {
        &self.documents
    }

    pub fn auth(&self) -> &AuthService<SharedStorage> {
        &self.auth
    }

    pub fn assistant(&self) -> &AssistantService<SharedStorage> {
        &self.assistant
    }

    /// Restore any stored session and load the document collection
    #[instrument(skip(self), name = "app_start")]
    pub async fn start(&self) -> Result<()> {
        self.auth.initialize().await?;
        if let Some(user) = self.auth.user().await {
            self.assistant.set_user(Some(user.id.as_str())).await?;
        }
        self.documents.fetch_documents().await
    }

    /// Sign in and load the user's conversations
    pub async fn sign_in(&self, credentials: LoginCredentials) -> Result<User> {
        let user = self.auth.login(credentials).await?;
        self.assistant.set_user(Some(user.id.as_str())).await?;
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.auth.logout().await?;
        self.assistant.set_user(None).await
    }

    /// Credentials of the built-in demo account
    pub fn demo_credentials(&self) -> LoginCredentials {
        LoginCredentials {
            email: self.config.auth.demo_email.clone(),
            password: self.config.auth.demo_password.clone(),
            remember_me: false,
        }
    }
}
