//! Per-(group, date) write serialisation.
//!
//! Every command against a lunchbreak runs as one logically atomic unit:
//! lookup-or-create, vote replacement, and the participant/absence
//! mutual-exclusion deletes must never interleave for the same day. The
//! services acquire a keyed async lock for the duration of the compound
//! mutation; reads go lock-free.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::GroupId;

/// Keyed async locks, one per (group, date).
///
/// Entries are created on first use and kept for the process lifetime;
/// the map stays small because keys are bounded by groups times the handful
/// of dates with live activity.
#[derive(Debug, Default)]
pub struct GroupDayLocks {
    entries: Mutex<HashMap<(GroupId, NaiveDate), Arc<AsyncMutex<()>>>>,
}

impl GroupDayLocks {
    /// Create an empty lock map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for (group, date), waiting until any holder of the
    /// same key releases it. Locks for different keys never contend.
    pub async fn acquire(&self, group_id: GroupId, date: NaiveDate) -> OwnedMutexGuard<()> {
        let entry = {
            let mut entries = self
                .entries
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(entries.entry((group_id, date)).or_default())
        };
        entry.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 13).expect("valid date")
    }

    #[tokio::test]
    async fn same_key_waits_for_the_holder() {
        let locks = Arc::new(GroupDayLocks::new());
        let group = GroupId::new(1);

        let guard = locks.acquire(group, date()).await;

        let entered = Arc::new(AtomicBool::new(false));
        let task = {
            let locks = Arc::clone(&locks);
            let entered = Arc::clone(&entered);
            tokio::spawn(async move {
                let _guard = locks.acquire(group, date()).await;
                entered.store(true, Ordering::SeqCst);
            })
        };

        tokio::task::yield_now().await;
        assert!(!entered.load(Ordering::SeqCst));

        drop(guard);
        task.await.expect("locking task completes");
        assert!(entered.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn different_keys_do_not_contend() {
        let locks = GroupDayLocks::new();
        let _one = locks.acquire(GroupId::new(1), date()).await;
        let _two = locks.acquire(GroupId::new(2), date()).await;
    }
}
