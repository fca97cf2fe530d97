//! Entity module - Contains all SeaORM entity definitions for the database.
//! The storefront keeps its durable state in a single key-value table, the
//! server-side stand-in for the original site's browser local storage.

pub mod stored_state;

pub use stored_state::{Column as StoredStateColumn, Entity as StoredState, Model as StoredStateModel};
