//! Bearer token persistence over injected key/value storage.

use learnsphere_core::{AuthConfig, KeyValueStorage, Result};

/// Reads and writes the auth token under a fixed storage key
pub struct TokenManager<S> {
    storage: S,
    key: String,
    prefix: String,
}

impl<S: KeyValueStorage> TokenManager<S> {
    pub fn new(storage: S, config: &AuthConfig) -> Self {
        Self {
            storage,
            key: config.token_storage_key.clone(),
            prefix: config.token_prefix.clone(),
        }
    }

    /// Stored token, if any
    pub fn token(&self) -> Result<Option<String>> {
        self.storage.get(&self.key)
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.storage.set(&self.key, token)
    }

    pub fn remove_token(&self) -> Result<()> {
        self.storage.remove(&self.key)
    }

    /// Non-empty and carrying the configured prefix
    pub fn is_token_valid(&self, token: &str) -> bool {
        !token.is_empty() && token.starts_with(&self.prefix)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnsphere_core::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_token_roundtrip() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = TokenManager::new(Arc::clone(&storage), &AuthConfig::default());

        assert_eq!(manager.token().unwrap(), None);
        manager.set_token("mock-jwt-token-42").unwrap();
        assert_eq!(manager.token().unwrap().as_deref(), Some("mock-jwt-token-42"));
        assert_eq!(
            storage.get("cityu_auth_token").unwrap().as_deref(),
            Some("mock-jwt-token-42")
        );

        manager.remove_token().unwrap();
        assert_eq!(manager.token().unwrap(), None);
    }

    #[test]
    fn test_token_validity() {
        let manager = TokenManager::new(MemoryStorage::new(), &AuthConfig::default());
        assert!(manager.is_token_valid("mock-jwt-token-1700000000000"));
        assert!(!manager.is_token_valid(""));
        assert!(!manager.is_token_valid("jwt-abc"));
    }
}
