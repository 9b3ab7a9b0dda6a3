//! State-owning authentication service.

use learnsphere_core::prelude::*;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::backend::AuthBackend;
use crate::token::TokenManager;

/// Message recorded when a stored token can no longer be used
pub const SESSION_EXPIRED: &str = "Session expired, please sign in again";

/// Snapshot of the auth state
#[derive(Debug, Clone)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// True until [`AuthService::initialize`] has run
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
            error: None,
        }
    }
}

impl AuthState {
    fn signed_in(&mut self, user: User) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.is_loading = false;
        self.error = None;
    }

    fn signed_out(&mut self, error: Option<String>) {
        self.user = None;
        self.is_authenticated = false;
        self.is_loading = false;
        self.error = error;
    }
}

/// Sign-in state plus the commands that change it
pub struct AuthService<S> {
    backend: Arc<dyn AuthBackend>,
    tokens: TokenManager<S>,
    config: AuthConfig,
    state: RwLock<AuthState>,
}

impl<S: KeyValueStorage> AuthService<S> {
    pub fn new(backend: Arc<dyn AuthBackend>, storage: S, config: AuthConfig) -> Self {
        Self {
            backend,
            tokens: TokenManager::new(storage, &config),
            config,
            state: RwLock::new(AuthState::default()),
        }
    }

    pub fn tokens(&self) -> &TokenManager<S> {
        &self.tokens
    }

    // ==================== Queries ====================

    pub async fn snapshot(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    // ==================== Commands ====================

    /// Restore the session from the stored token.
    ///
    /// A missing or malformed token leaves the service signed out. A token
    /// the backend rejects is removed and [`SESSION_EXPIRED`] is recorded;
    /// that is not reported as an error to the caller.
    #[instrument(skip(self), name = "auth_initialize")]
    pub async fn initialize(&self) -> Result<()> {
        let token = self.tokens.token()?;
        let Some(token) = token.filter(|t| self.tokens.is_token_valid(t)) else {
            log::debug!("No usable stored token");
            self.state.write().await.signed_out(None);
            return Ok(());
        };

        match self.backend.current_user(&token).await {
            Ok(user) => {
                log::info!("Restored session for {}", user.username);
                self.state.write().await.signed_in(user);
            }
            Err(e) => {
                log::warn!("Stored token rejected: {}", e);
                self.tokens.remove_token()?;
                self.state
                    .write()
                    .await
                    .signed_out(Some(SESSION_EXPIRED.to_string()));
            }
        }
        Ok(())
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email), name = "auth_login")]
    pub async fn login(&self, credentials: LoginCredentials) -> Result<User> {
        self.begin().await;

        match self.backend.login(&credentials).await {
            Ok(session) => {
                self.tokens.set_token(&session.token)?;
                log::info!("Signed in as {}", session.user.username);
                self.state.write().await.signed_in(session.user.clone());
                Ok(session.user)
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    /// Validate the form, then create the account and sign it in
    #[instrument(skip(self, data), fields(email = %data.email), name = "auth_register")]
    pub async fn register(&self, data: RegisterData) -> Result<User> {
        self.begin().await;

        if let Err(e) = data.validate(&self.config.allowed_email_domain).into_result() {
            return Err(self.fail(e).await);
        }

        match self.backend.register(&data).await {
            Ok(session) => {
                self.tokens.set_token(&session.token)?;
                self.state.write().await.signed_in(session.user.clone());
                Ok(session.user)
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    pub async fn logout(&self) -> Result<()> {
        self.tokens.remove_token()?;
        self.state.write().await.signed_out(None);
        log::info!("Signed out");
        Ok(())
    }

    /// Update the signed-in user's profile. Failure keeps the user signed in.
    #[instrument(skip(self, update), name = "auth_update_profile")]
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        let Some(user_id) = self.user().await.map(|u| u.id) else {
            let e = Error::unauthenticated("Not signed in");
            self.state.write().await.error = Some(e.to_string());
            return Err(e);
        };

        match self.backend.update_profile(&user_id, &update).await {
            Ok(user) => {
                self.state.write().await.user = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                self.state.write().await.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.is_loading = true;
        state.error = None;
    }

    async fn fail(&self, error: Error) -> Error {
        log::warn!("Authentication failed: {}", error);
        self.state.write().await.signed_out(Some(error.to_string()));
        error
    }
}
