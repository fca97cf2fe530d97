//! Database configuration module for `İpekButik`.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. The
//! schema is generated from the entity definitions with
//! `Schema::create_table_from_entity`, so no manual SQL is needed; the only
//! table is the `stored_state` key-value store.

use crate::entities::StoredState;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable, falling back to a local file next to the binary.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/ipek_butik.sqlite?mode=rwc".to_string());

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the `stored_state` table from its entity definition.
/// Safe to call on an empty database only; existing data is left alone by
/// connecting without calling this.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let stored_state_table = schema
        .create_table_from_entity(StoredState)
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&stored_state_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::StoredStateModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables_in_memory() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Table exists and is queryable.
        let _: Vec<StoredStateModel> = StoredState::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
