//! # LearnSphere Core
//!
//! Core data models, error types, and configuration shared by every
//! LearnSphere crate.
//!
//! ## Architecture Principles
//!
//! - **Type-Driven Design**: Strong types replace string-based APIs
//! - **Zero Panic in Libraries**: All errors are `Result<T, Error>`
//! - **Explicit Dependencies**: configuration and storage are passed in at
//!   construction, never looked up globally
//!
//! ## Core Modules
//!
//! - [`models`] - Documents, links, users and chat types
//! - [`error`] - Error type and Result alias
//! - [`config`] - Application configuration
//! - [`profiles`] - Configuration presets
//! - [`validation`] - Form validation
//! - [`storage`] - Injected key/value storage
//!
//! ## Usage Examples
//!
//! ```
//! use learnsphere_core::prelude::*;
//!
//! fn load() -> Result<AppConfig> {
//!     let config = ConfigProfile::Testing.create_config();
//!     config.validate()?;
//!     Ok(config)
//! }
//! # assert!(load().is_ok());
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod profiles;
pub mod storage;
pub mod validation;

pub use self::config::*;
pub use error::{Error, Result};
pub use models::*;
pub use profiles::ConfigProfile;
pub use storage::{KeyValueStorage, MemoryStorage, load_json, store_json};
pub use validation::{Severity, ValidationIssue, ValidationReport};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{
        AppConfig, AssistantConfig, AuthConfig, DocumentConfig, LatencyConfig,
    };
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        AssistantResponse, AuthSession, BiDirectionalLink, ChatMessage, ChatPreferences,
        ChatRole, ChatSession, CreateDocument, Document, DocumentAnalysis, DocumentMetadata,
        LinkSource, LinkType, LoginCredentials, PreferencesUpdate, ProfileUpdate, QuickPrompt,
        RegisterData, SendMessageRequest, TocEntry, UpdateDocument, User,
    };
    pub use crate::profiles::ConfigProfile;
    pub use crate::storage::{KeyValueStorage, MemoryStorage};
    pub use crate::validation::{Severity, ValidationIssue, ValidationReport};
}
