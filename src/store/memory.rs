//! In-memory implementation of the [`StateStore`] boundary.
//!
//! Drop-in substitute for the SQLite store in tests; state lives in a map
//! and dies with the value.

use crate::{errors::Result, store::StateStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Volatile state store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStateStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a single key, for tests that need to
    /// start from existing (possibly malformed) persisted state.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self {
            values: RwLock::new(values),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_and_overwrite() -> Result<()> {
        let store = MemoryStateStore::new();

        assert!(store.load("cart").await?.is_none());

        store.save("cart", "a").await?;
        store.save("cart", "b").await?;
        assert_eq!(store.load("cart").await?.as_deref(), Some("b"));
        Ok(())
    }

    #[tokio::test]
    async fn test_with_value_seeds_key() -> Result<()> {
        let store = MemoryStateStore::with_value("cart", "not json");
        assert_eq!(store.load("cart").await?.as_deref(), Some("not json"));
        Ok(())
    }
}
