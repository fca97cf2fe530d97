//! Custom designs and the generated-design history.
//!
//! A custom design is what the image designer returns: the embeddable image
//! payload plus the prompt that produced it. The history keeps the six most
//! recent designs in the state store so shoppers can re-use an earlier result
//! without burning quota.

use crate::{
    errors::Result,
    store::{DESIGN_HISTORY_KEY, StateStore},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Number of history entries kept; older ones fall off the end.
pub const HISTORY_CAPACITY: usize = 6;

/// An AI-generated cake design: image payload plus the producing prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDesign {
    /// Embeddable image as a `data:image/png;base64,…` string
    pub image: String,
    /// The shopper's prompt that produced the image
    pub prompt: String,
}

/// One remembered design with its identity and creation time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignHistoryItem {
    /// History entry identifier
    pub id: Uuid,
    /// The design itself
    #[serde(flatten)]
    pub design: CustomDesign,
    /// When the design was generated
    pub timestamp: DateTime<Utc>,
}

/// Durable, capped list of recently generated designs, newest first.
pub struct DesignHistory {
    store: Arc<dyn StateStore>,
}

impl DesignHistory {
    /// Creates a history over the given state store.
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// The remembered designs, newest first. Malformed persisted state is
    /// discarded with a warning and reads as empty.
    pub async fn list(&self) -> Result<Vec<DesignHistoryItem>> {
        let Some(raw) = self.store.load(DESIGN_HISTORY_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!("Discarding malformed design history: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Prepends a freshly generated design, dropping anything beyond the cap,
    /// and persists the updated list. Returns the stored entry.
    pub async fn record(&self, design: CustomDesign, now: DateTime<Utc>) -> Result<DesignHistoryItem> {
        let entry = DesignHistoryItem {
            id: Uuid::new_v4(),
            design,
            timestamp: now,
        };

        let mut items = self.list().await?;
        items.insert(0, entry.clone());
        items.truncate(HISTORY_CAPACITY);

        let serialized = serde_json::to_string(&items)?;
        self.store.save(DESIGN_HISTORY_KEY, &serialized).await?;
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::store::MemoryStateStore;

    fn design(n: usize) -> CustomDesign {
        CustomDesign {
            image: format!("data:image/png;base64,IMG{n}"),
            prompt: format!("pasta {n}"),
        }
    }

    #[tokio::test]
    async fn test_record_prepends_newest_first() -> Result<()> {
        let history = DesignHistory::new(Arc::new(MemoryStateStore::new()));
        let now = Utc::now();

        history.record(design(1), now).await?;
        history.record(design(2), now).await?;

        let items = history.list().await?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].design.prompt, "pasta 2");
        assert_eq!(items[1].design.prompt, "pasta 1");
        Ok(())
    }

    #[tokio::test]
    async fn test_history_is_capped_at_six() -> Result<()> {
        let history = DesignHistory::new(Arc::new(MemoryStateStore::new()));
        let now = Utc::now();

        for n in 1..=8 {
            history.record(design(n), now).await?;
        }

        let items = history.list().await?;
        assert_eq!(items.len(), HISTORY_CAPACITY);
        assert_eq!(items[0].design.prompt, "pasta 8");
        assert_eq!(items[5].design.prompt, "pasta 3");
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_history_reads_as_empty() -> Result<()> {
        let store = Arc::new(MemoryStateStore::with_value(DESIGN_HISTORY_KEY, "[{broken"));
        let history = DesignHistory::new(store);

        assert!(history.list().await?.is_empty());
        Ok(())
    }
}
