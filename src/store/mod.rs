//! Durable state persistence boundary.
//!
//! The original storefront kept shopper state in browser local storage under a
//! handful of fixed keys. This module is the server-side equivalent: a narrow
//! trait over "load serialized state" / "save serialized state", with a SQLite
//! implementation for production and an in-memory fake for tests. Stores hand
//! back raw JSON strings; interpreting (and silently resetting malformed)
//! state is the owning component's job.

/// In-memory state store used as a test fake
pub mod memory;
/// SQLite-backed state store used in production
pub mod sqlite;

pub use memory::MemoryStateStore;
pub use sqlite::SqliteStateStore;

use crate::errors::Result;
use async_trait::async_trait;

/// State key for the serialized cart line collection.
pub const CART_KEY: &str = "cart";
/// State key for the daily design-generation quota record.
pub const DESIGN_QUOTA_KEY: &str = "design_quota";
/// State key for the capped design history list.
pub const DESIGN_HISTORY_KEY: &str = "design_history";

/// Narrow persistence boundary for serialized shopper state.
///
/// Implementations must overwrite on save; there is exactly one value per key.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Loads the serialized value stored under `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Saves `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> Result<()>;
}
