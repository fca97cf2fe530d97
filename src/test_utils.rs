//! Shared test utilities for `İpekButik`.
//!
//! Helpers for setting up in-memory databases and building domain values with
//! sensible defaults. Content fixtures come straight from the shipped
//! config.toml so tests exercise the real catalog.

use crate::{
    config::content::ContentConfig,
    core::{
        catalog::{Catalog, CatalogItem, Category},
        order::{OrderFlow, OrderSubject, SizeTier},
        quiz::QuizContent,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all persistence tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The shipped content configuration, parsed fresh.
#[allow(clippy::missing_panics_doc)]
pub fn test_content() -> ContentConfig {
    #[allow(clippy::unwrap_used)]
    toml::from_str(include_str!("../config.toml")).unwrap()
}

/// The shipped catalog (storefront plus campaign products).
pub fn test_catalog() -> Catalog {
    test_content().catalog()
}

/// The shipped size tiers (modifiers 0 / 250 / 500 / 900 lira).
pub fn test_sizes() -> Vec<SizeTier> {
    test_content().size_tiers()
}

/// The shipped quiz questions and recommendation table.
pub fn test_quiz_content() -> QuizContent {
    test_content().quiz
}

/// Builds a priced birthday-category catalog item.
pub fn test_item(id: i64, name: &str, price_lira: Option<i64>) -> CatalogItem {
    CatalogItem {
        id,
        name: name.to_string(),
        category: Category::Birthday,
        price: price_lira.map(crate::core::money::Money::from_lira),
        image_url: format!("https://example.com/{id}.jpg"),
        description: "Test ürünü".to_string(),
        instagram_url: None,
    }
}

/// Builds a quote-on-request item with no price.
pub fn unpriced_item(id: i64, name: &str) -> CatalogItem {
    CatalogItem {
        category: Category::Special,
        ..test_item(id, name, None)
    }
}

/// Opens an order flow for `item` with the shipped defaults and the `IPEK`
/// reference prefix.
pub fn test_flow_for(item: CatalogItem) -> OrderFlow {
    let content = test_content();
    OrderFlow::open(
        OrderSubject::Item(item),
        content.default_size(),
        content.default_flavor().to_string(),
        "IPEK".to_string(),
    )
}
