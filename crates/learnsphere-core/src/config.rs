//! Application configuration.
//!
//! Every service receives its section of [`AppConfig`] at construction; there
//! is no ambient global state. Configuration can be layered from an optional
//! YAML/TOML/JSON file and `LEARNSPHERE__*` environment variables.

use crate::error::{Error, Result};
use crate::models::ChatPreferences;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix used by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "LEARNSPHERE";

/// Document manager settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Words per minute used for reading time estimates
    pub reading_speed_wpm: u32,
    /// Default summary length (characters) for listings
    pub summary_max_length: usize,
    /// How many recently opened documents to remember
    pub recent_limit: usize,
    /// Name recorded as `last_edited_by` when no editor is given
    pub default_editor: String,
    /// Owner id assigned to newly created documents
    pub default_author_id: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            reading_speed_wpm: 200,
            summary_max_length: 150,
            recent_limit: 10,
            default_editor: "Demo Student".to_string(),
            default_author_id: "1".to_string(),
        }
    }
}

/// Authentication settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Storage key holding the bearer token
    pub token_storage_key: String,
    /// Prefix every issued token carries
    pub token_prefix: String,
    /// Institutional email suffix required for sign-up
    pub allowed_email_domain: String,
    pub demo_email: String,
    pub demo_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_storage_key: "cityu_auth_token".to_string(),
            token_prefix: "mock-jwt-token-".to_string(),
            allowed_email_domain: "@cityu.edu.hk".to_string(),
            demo_email: "student@cityu.edu.hk".to_string(),
            demo_password: "password123".to_string(),
        }
    }
}

/// Study assistant settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Storage key holding the JSON-encoded chat preferences
    pub preferences_storage_key: String,
    /// Model name reported on replies
    pub model: String,
    pub default_preferences: ChatPreferences,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            preferences_storage_key: "ai_preferences".to_string(),
            model: "deepseek-chat".to_string(),
            default_preferences: ChatPreferences::default(),
        }
    }
}

/// Artificial delays applied by the simulated backends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub enabled: bool,
    pub list_ms: u64,
    pub read_ms: u64,
    pub write_ms: u64,
    pub delete_ms: u64,
    pub assistant_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            list_ms: 500,
            read_ms: 300,
            write_ms: 800,
            delete_ms: 400,
            assistant_ms: 1500,
        }
    }
}

impl LatencyConfig {
    fn delay(&self, ms: u64) -> Duration {
        if self.enabled {
            Duration::from_millis(ms)
        } else {
            Duration::ZERO
        }
    }

    pub fn list(&self) -> Duration {
        self.delay(self.list_ms)
    }

    pub fn read(&self) -> Duration {
        self.delay(self.read_ms)
    }

    pub fn write(&self) -> Duration {
        self.delay(self.write_ms)
    }

    pub fn delete(&self) -> Duration {
        self.delay(self.delete_ms)
    }

    pub fn assistant(&self) -> Duration {
        self.delay(self.assistant_ms)
    }
}

/// Global application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration profile name
    pub profile: String,
    pub log_level: String,
    pub documents: DocumentConfig,
    pub auth: AuthConfig,
    pub assistant: AssistantConfig,
    pub latency: LatencyConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            log_level: "info".to_string(),
            documents: DocumentConfig::default(),
            auth: AuthConfig::default(),
            assistant: AssistantConfig::default(),
            latency: LatencyConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from an optional file, then environment overrides.
    ///
    /// Nested keys use a double underscore, e.g.
    /// `LEARNSPHERE__DOCUMENTS__RECENT_LIMIT=20`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_layered(Self::default(), path)
    }

    /// Like [`AppConfig::load`] but starting from the given base values
    /// (typically a profile preset) instead of the defaults.
    pub fn load_layered(base: AppConfig, path: Option<&Path>) -> Result<Self> {
        let base_source = ::config::Config::try_from(&base)
            .map_err(|e| Error::config_error(format!("Invalid base configuration: {}", e)))?;
        let mut builder = ::config::Config::builder().add_source(base_source);

        if let Some(path) = path {
            if !path.exists() {
                return Err(Error::config_error(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            log::debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(::config::File::from(path));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| Error::config_error(format!("Failed to load configuration: {}", e)))?;
        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.documents.reading_speed_wpm == 0 {
            return Err(Error::config_error("Reading speed must be positive"));
        }
        if self.documents.summary_max_length == 0 {
            return Err(Error::config_error("Summary length must be positive"));
        }
        if self.documents.recent_limit == 0 {
            return Err(Error::config_error("Recent document limit must be positive"));
        }
        if self.auth.token_prefix.is_empty() {
            return Err(Error::config_error("Token prefix cannot be empty"));
        }
        if !self.auth.allowed_email_domain.starts_with('@') {
            return Err(Error::config_error(
                "Allowed email domain must start with '@'",
            ));
        }
        if self.auth.token_storage_key.is_empty()
            || self.assistant.preferences_storage_key.is_empty()
        {
            return Err(Error::config_error("Storage keys cannot be empty"));
        }
        if self.assistant.default_preferences.max_tokens == 0 {
            return Err(Error::config_error("max_tokens must be positive"));
        }
        Ok(())
    }

    /// Render as YAML (used by `learnsphere config`)
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.documents.reading_speed_wpm, 200);
        assert_eq!(config.documents.recent_limit, 10);
    }

    #[test]
    fn test_config_validation_rejects_zero_speed() {
        let mut config = AppConfig::new();
        config.documents.reading_speed_wpm = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_bad_domain() {
        let mut config = AppConfig::new();
        config.auth.allowed_email_domain = "cityu.edu.hk".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_latency_disabled_is_zero() {
        let latency = LatencyConfig::default();
        assert_eq!(latency.write(), Duration::ZERO);

        let enabled = LatencyConfig {
            enabled: true,
            ..LatencyConfig::default()
        };
        assert_eq!(enabled.write(), Duration::from_millis(800));
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "log_level: debug\ndocuments:\n  recent_limit: 3").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.documents.recent_limit, 3);
        // Untouched keys keep their defaults
        assert_eq!(config.documents.reading_speed_wpm, 200);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = AppConfig::load(Some(Path::new("/definitely/not/here.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_yaml_roundtrip_contains_sections() {
        let yaml = AppConfig::new().to_yaml().unwrap();
        assert!(yaml.contains("documents:"));
        assert!(yaml.contains("reading_speed_wpm: 200"));
    }
}
