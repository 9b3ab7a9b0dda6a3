//! Pre-configured profiles for different deployment scenarios
//!
//! - Development: verbose logging, simulated network latency
//! - Production: info logging, no artificial delays
//! - Testing: quiet logging, no delays, small recent list

use crate::config::AppConfig;
use crate::error::{Error, Result};
use std::str::FromStr;

/// Profile selector for pre-configured deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigProfile {
    /// Development: Verbose logging, latency simulation on
    Development,
    /// Production: Info logging, no simulated delays
    Production,
    /// Testing: Warnings only, deterministic and fast
    Testing,
}

impl ConfigProfile {
    /// Create an AppConfig from this profile
    pub fn create_config(self) -> AppConfig {
        let mut config = AppConfig::new();

        match self {
            Self::Development => {
                config.profile = "development".to_string();
                config.log_level = "debug".to_string();
                config.latency.enabled = true;
            }

            Self::Production => {
                config.profile = "production".to_string();
                config.log_level = "info".to_string();
                config.latency.enabled = false;
            }

            Self::Testing => {
                config.profile = "testing".to_string();
                config.log_level = "warn".to_string();
                config.latency.enabled = false;
                config.documents.recent_limit = 5;
            }
        }

        config
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        }
    }
}

impl FromStr for ConfigProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "testing" | "test" => Ok(Self::Testing),
            other => Err(Error::config_error(format!("Unknown profile: {}", other))),
        }
    }
}
