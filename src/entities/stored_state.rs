//! Stored state entity - Durable key-value pairs for shopper state.
//! Each row holds one serialized blob: the cart line collection, the daily
//! design-generation quota, or the design history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored state database model - one serialized value per fixed key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stored_state")]
pub struct Model {
    /// State key (e.g., `"cart"`, `"design_quota"`, `"design_history"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized JSON value
    pub value: String,
    /// When this value was last written
    pub updated_at: DateTime,
}

/// `StoredState` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
