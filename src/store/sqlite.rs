//! SQLite-backed implementation of the [`StateStore`] boundary.
//!
//! Persists one row per state key in the `stored_state` table. Writes are
//! upserts so callers can save without caring whether the key already exists.

use crate::{
    entities::{StoredState, stored_state},
    errors::Result,
    store::StateStore,
};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, Set, prelude::*, sea_query::OnConflict};

/// Production state store writing through to the `stored_state` table.
#[derive(Debug, Clone)]
pub struct SqliteStateStore {
    db: DatabaseConnection,
}

impl SqliteStateStore {
    /// Creates a state store over an already-initialized database connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StateStore for SqliteStateStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let row = StoredState::find_by_id(key).one(&self.db).await?;
        Ok(row.map(|r| r.value))
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let row = stored_state::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(chrono::Utc::now().naive_utc()),
        };

        StoredState::insert(row)
            .on_conflict(
                OnConflict::column(stored_state::Column::Key)
                    .update_columns([
                        stored_state::Column::Value,
                        stored_state::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_load_missing_key_returns_none() -> Result<()> {
        let db = setup_test_db().await?;
        let store = SqliteStateStore::new(db);

        assert!(store.load("cart").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() -> Result<()> {
        let db = setup_test_db().await?;
        let store = SqliteStateStore::new(db);

        store.save("cart", "[1,2,3]").await?;
        assert_eq!(store.load("cart").await?.as_deref(), Some("[1,2,3]"));
        Ok(())
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_value() -> Result<()> {
        let db = setup_test_db().await?;
        let store = SqliteStateStore::new(db);

        store.save("design_quota", r#"{"count":1}"#).await?;
        store.save("design_quota", r#"{"count":2}"#).await?;

        assert_eq!(
            store.load("design_quota").await?.as_deref(),
            Some(r#"{"count":2}"#)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_keys_are_independent() -> Result<()> {
        let db = setup_test_db().await?;
        let store = SqliteStateStore::new(db);

        store.save("cart", "[]").await?;
        store.save("design_history", "[{}]").await?;

        assert_eq!(store.load("cart").await?.as_deref(), Some("[]"));
        assert_eq!(store.load("design_history").await?.as_deref(), Some("[{}]"));
        Ok(())
    }
}
