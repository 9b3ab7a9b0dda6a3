//! # Authentication
//!
//! Sign-in, sign-up and session restore for LearnSphere.
//!
//! - [`AuthBackend`]: account operations (login, register, current user,
//!   profile update)
//! - [`MockAuthBackend`]: in-process backend with a demo account
//! - [`TokenManager`]: bearer token persistence over injected storage
//! - [`AuthService`]: sign-in state and the commands that change it
//!
//! ```
//! use learnsphere_auth::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let config = AuthConfig::default();
//! let backend = Arc::new(MockAuthBackend::new(config.clone()));
//! let auth = AuthService::new(backend, MemoryStorage::new(), config.clone());
//!
//! auth.initialize().await?;
//! let user = auth
//!     .login(LoginCredentials {
//!         email: config.demo_email.clone(),
//!         password: config.demo_password.clone(),
//!         remember_me: false,
//!     })
//!     .await?;
//! assert!(auth.is_authenticated().await);
//! assert_eq!(user.email, config.demo_email);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod service;
pub mod token;

pub use backend::{AuthBackend, MockAuthBackend};
pub use service::{AuthService, AuthState, SESSION_EXPIRED};
pub use token::TokenManager;

pub mod prelude {
    pub use crate::backend::{AuthBackend, MockAuthBackend};
    pub use crate::service::{AuthService, AuthState};
    pub use crate::token::TokenManager;
    pub use learnsphere_core::prelude::*;
}
