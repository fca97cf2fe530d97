//! Shopping cart store - the shopper's current selection and its persistence.
//!
//! Cart lines are keyed by a line-unique id generated at add-time, never by
//! catalog id, so the same product can sit in the cart twice and removing one
//! line leaves its twin alone. Every mutation writes the full collection
//! through the [`StateStore`] under the `cart` key; at startup the collection
//! is restored once, and absent or malformed state yields an empty cart.

use crate::{
    core::{catalog::CatalogItem, money::Money},
    errors::Result,
    store::{CART_KEY, StateStore},
};
use serde::{Deserialize, Serialize};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

/// One shopper-selected unit in the cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Line-unique identifier, distinct from the catalog id
    pub line_id: Uuid,
    /// Snapshot of the selected product
    pub item: CatalogItem,
    /// Unit count; always 1 today, duplicates are separate lines
    pub quantity: u32,
}

/// The cart: selected lines plus the presentational panel-visibility flag.
pub struct CartStore {
    store: Arc<dyn StateStore>,
    lines: RwLock<Vec<CartLine>>,
    panel_open: AtomicBool,
}

impl CartStore {
    /// Restores the cart from the state store.
    ///
    /// Malformed persisted state is discarded with a warning and the cart
    /// starts empty; this is never an error.
    pub async fn load(store: Arc<dyn StateStore>) -> Result<Self> {
        let lines = match store.load(CART_KEY).await? {
            Some(raw) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => lines,
                Err(e) => {
                    warn!("Discarding malformed cart state: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Ok(Self {
            store,
            lines: RwLock::new(lines),
            panel_open: AtomicBool::new(false),
        })
    }

    /// Appends a new line for `item` with a fresh line id and quantity 1.
    ///
    /// Always succeeds; opens the cart panel as an observable side effect.
    pub async fn add(&self, item: CatalogItem) -> Result<CartLine> {
        let line = CartLine {
            line_id: Uuid::new_v4(),
            item,
            quantity: 1,
        };

        let mut lines = self.lines.write().await;
        lines.push(line.clone());
        self.persist(&lines).await?;
        drop(lines);

        self.panel_open.store(true, Ordering::Relaxed);
        Ok(line)
    }

    /// Removes the line with `line_id` if present; a no-op for unknown ids.
    pub async fn remove(&self, line_id: Uuid) -> Result<()> {
        let mut lines = self.lines.write().await;
        lines.retain(|line| line.line_id != line_id);
        self.persist(&lines).await
    }

    /// Empties the cart.
    pub async fn clear(&self) -> Result<()> {
        let mut lines = self.lines.write().await;
        lines.clear();
        self.persist(&lines).await
    }

    /// Flips the cart panel visibility flag and returns the new state.
    /// Purely presentational; the line collection is untouched.
    pub fn toggle_panel(&self) -> bool {
        !self.panel_open.fetch_xor(true, Ordering::Relaxed)
    }

    /// Whether the cart panel is currently shown.
    pub fn is_panel_open(&self) -> bool {
        self.panel_open.load(Ordering::Relaxed)
    }

    /// A snapshot of the current lines in insertion order.
    pub async fn lines(&self) -> Vec<CartLine> {
        self.lines.read().await.clone()
    }

    /// Number of lines in the cart.
    pub async fn count(&self) -> usize {
        self.lines.read().await.len()
    }

    /// Sum of line prices; an unpriced (quote-on-request) line contributes zero.
    pub async fn total(&self) -> Money {
        self.lines
            .read()
            .await
            .iter()
            .map(|line| line.item.price.unwrap_or_else(Money::zero))
            .sum()
    }

    async fn persist(&self, lines: &[CartLine]) -> Result<()> {
        let serialized = serde_json::to_string(lines)?;
        self.store.save(CART_KEY, &serialized).await
    }
}
