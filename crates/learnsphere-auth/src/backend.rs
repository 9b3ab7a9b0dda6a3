//! Authentication backends.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use learnsphere_core::prelude::*;
use learnsphere_core::{Language, Theme, UserPreferences, UserRole};
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::instrument;

/// Account operations behind the auth service
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Check credentials and issue a token
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession>;

    /// Create an account and sign it in
    async fn register(&self, data: &RegisterData) -> Result<AuthSession>;

    /// Resolve the user a token was issued for
    async fn current_user(&self, token: &str) -> Result<User>;

    /// Apply a partial profile change
    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<User>;
}

/// In-process backend with one demo account.
///
/// Registered accounts live for the lifetime of the backend. Tokens with the
/// configured prefix that this instance did not issue (e.g. restored from a
/// previous run) resolve to the demo account.
pub struct MockAuthBackend {
    config: AuthConfig,
    users: DashMap<String, User>,
    passwords: DashMap<String, String>,
    tokens: DashMap<String, String>,
    /// Millisecond stamp of the last issued token
    last_issued: AtomicI64,
}

const DEMO_USER_ID: &str = "1";

impl MockAuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        let backend = Self {
            users: DashMap::new(),
            passwords: DashMap::new(),
            tokens: DashMap::new(),
            last_issued: AtomicI64::new(0),
            config,
        };

        let demo = backend.demo_user();
        backend
            .passwords
            .insert(demo.email.clone(), backend.config.demo_password.clone());
        backend.users.insert(demo.id.clone(), demo);
        backend
    }

    fn demo_user(&self) -> User {
        let now = Utc::now();
        User {
            id: DEMO_USER_ID.to_string(),
            email: self.config.demo_email.clone(),
            username: "cityu_student".to_string(),
            full_name: "Demo Student".to_string(),
            avatar: None,
            department: Some("Computer Science".to_string()),
            student_id: Some("12345678".to_string()),
            role: UserRole::Student,
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Stamps are strictly increasing, so two sign-ins within the same
    /// millisecond still get distinct tokens.
    fn issue_token(&self, user_id: &str) -> String {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_issued
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        let stamp = now.max(previous + 1);
        let token = format!("{}{}", self.config.token_prefix, stamp);
        self.tokens.insert(token.clone(), user_id.to_string());
        token
    }

    fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    #[instrument(skip(self, credentials), fields(email = %credentials.email), name = "auth_backend_login")]
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession> {
        let password_ok = self
            .passwords
            .get(&credentials.email)
            .is_some_and(|stored| *stored == credentials.password);

        let user = match self.find_by_email(&credentials.email) {
            Some(user) if password_ok => user,
            _ => return Err(Error::invalid_credentials("Incorrect email or password")),
        };

        let token = self.issue_token(&user.id);
        Ok(AuthSession { user, token })
    }

    #[instrument(skip(self, data), fields(email = %data.email), name = "auth_backend_register")]
    async fn register(&self, data: &RegisterData) -> Result<AuthSession> {
        if !data.email.contains(&self.config.allowed_email_domain) {
            return Err(Error::validation_error(format!(
                "Please register with an institutional address ({})",
                self.config.allowed_email_domain
            )));
        }
        if self.find_by_email(&data.email).is_some() {
            return Err(Error::validation_error("This email is already registered"));
        }

        let now = Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: data.email.clone(),
            username: data.username.clone(),
            full_name: data.full_name.clone(),
            avatar: None,
            department: data.department.clone(),
            student_id: data.student_id.clone(),
            role: data.role,
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        };

        self.passwords
            .insert(user.email.clone(), data.password.clone());
        self.users.insert(user.id.clone(), user.clone());
        log::info!("Registered user {}", user.username);

        let token = self.issue_token(&user.id);
        Ok(AuthSession { user, token })
    }

    async fn current_user(&self, token: &str) -> Result<User> {
        if !token.starts_with(&self.config.token_prefix) {
            return Err(Error::unauthenticated("Invalid token"));
        }

        let user_id = self
            .tokens
            .get(token)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| DEMO_USER_ID.to_string());

        self.users
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::unauthenticated("Unknown session"))
    }

    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<User> {
        let mut user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| Error::not_found(format!("user {}", user_id)))?;

        if let Some(full_name) = &update.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(avatar) = &update.avatar {
            user.avatar = Some(avatar.clone());
        }
        if let Some(department) = &update.department {
            user.department = Some(department.clone());
        }
        apply_preferences(&mut user.preferences, update.language, update.theme, update.notifications);
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}

fn apply_preferences(
    preferences: &mut UserPreferences,
    language: Option<Language>,
    theme: Option<Theme>,
    notifications: Option<bool>,
) {
    if let Some(language) = language {
        preferences.language = language;
    }
    if let Some(theme) = theme {
        preferences.theme = theme;
    }
    if let Some(notifications) = notifications {
        preferences.notifications = notifications;
    }
}
