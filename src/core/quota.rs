//! Daily design-generation quota.
//!
//! Caps how many image generations a day may issue. The `{day, count}` record
//! lives in the state store; when the stored day is no longer today the count
//! resets. Enforcement is checked before a request is issued, and only a
//! successful generation consumes quota. This is a courtesy limit on our own
//! spend, not a security boundary.

use crate::{
    errors::Result,
    store::{DESIGN_QUOTA_KEY, StateStore},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Default number of generations allowed per calendar day.
pub const DAILY_LIMIT: u32 = 3;

/// Persisted quota record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct QuotaRecord {
    day: NaiveDate,
    count: u32,
}

/// Tracks generations used against the daily limit.
pub struct DesignQuota {
    store: Arc<dyn StateStore>,
    limit: u32,
}

impl DesignQuota {
    /// Creates a quota tracker with the default daily limit.
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self::with_limit(store, DAILY_LIMIT)
    }

    /// Creates a quota tracker with a custom daily limit.
    #[must_use]
    pub const fn with_limit(store: Arc<dyn StateStore>, limit: u32) -> Self {
        Self { store, limit }
    }

    /// The configured daily limit.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Remaining allowance for `today`: `limit − count`, floored at zero.
    /// A record from an earlier day (or a malformed one) reads as unused.
    pub async fn remaining(&self, today: NaiveDate) -> Result<u32> {
        let used = match self.load_record().await? {
            Some(record) if record.day == today => record.count,
            _ => 0,
        };
        Ok(self.limit.saturating_sub(used))
    }

    /// Records one successful generation for `today` and returns the new
    /// remaining allowance. A stale record restarts the count at one.
    pub async fn record_use(&self, today: NaiveDate) -> Result<u32> {
        let count = match self.load_record().await? {
            Some(record) if record.day == today => record.count.saturating_add(1),
            _ => 1,
        };

        let record = QuotaRecord { day: today, count };
        let serialized = serde_json::to_string(&record)?;
        self.store.save(DESIGN_QUOTA_KEY, &serialized).await?;

        Ok(self.limit.saturating_sub(count))
    }

    async fn load_record(&self) -> Result<Option<QuotaRecord>> {
        let Some(raw) = self.store.load(DESIGN_QUOTA_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!("Discarding malformed quota record: {e}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::store::MemoryStateStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[tokio::test]
    async fn test_fresh_quota_has_full_allowance() -> Result<()> {
        let quota = DesignQuota::new(Arc::new(MemoryStateStore::new()));
        assert_eq!(quota.remaining(day(1)).await?, DAILY_LIMIT);
        Ok(())
    }

    #[tokio::test]
    async fn test_limit_reached_after_three_uses() -> Result<()> {
        let quota = DesignQuota::new(Arc::new(MemoryStateStore::new()));

        assert_eq!(quota.record_use(day(1)).await?, 2);
        assert_eq!(quota.record_use(day(1)).await?, 1);
        assert_eq!(quota.record_use(day(1)).await?, 0);

        // The fourth attempt finds no allowance left.
        assert_eq!(quota.remaining(day(1)).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_next_day_resets_to_full_limit() -> Result<()> {
        let quota = DesignQuota::new(Arc::new(MemoryStateStore::new()));

        for _ in 0..3 {
            quota.record_use(day(1)).await?;
        }
        assert_eq!(quota.remaining(day(1)).await?, 0);

        assert_eq!(quota.remaining(day(2)).await?, DAILY_LIMIT);
        // Using on the new day restarts the count.
        assert_eq!(quota.record_use(day(2)).await?, DAILY_LIMIT - 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_record_reads_as_unused() -> Result<()> {
        let store = Arc::new(MemoryStateStore::with_value(DESIGN_QUOTA_KEY, "nonsense"));
        let quota = DesignQuota::new(store);

        assert_eq!(quota.remaining(day(1)).await?, DAILY_LIMIT);
        Ok(())
    }

    #[tokio::test]
    async fn test_count_never_exceeds_floor() -> Result<()> {
        let quota = DesignQuota::with_limit(Arc::new(MemoryStateStore::new()), 1);

        assert_eq!(quota.record_use(day(1)).await?, 0);
        // Even an extra recorded use floors at zero remaining.
        assert_eq!(quota.record_use(day(1)).await?, 0);
        Ok(())
    }
}
