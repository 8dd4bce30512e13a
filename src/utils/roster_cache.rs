use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use std::future::ready;
use std::sync::Arc;
use std::time::Duration;

use crate::model::attendance::AttendanceStatus;
use crate::reconcile::{RosterEntry, apply_status_update};

pub type RosterSnapshot = Arc<Vec<RosterEntry>>;

/// Reconciled rosters keyed by `YYYY-MM-DD`.
///
/// Snapshots are immutable; every change stores a new one in place of the old.
#[derive(Clone)]
pub struct RosterCache {
    inner: Cache<String, RosterSnapshot>,
}

impl RosterCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn snapshot(&self, date: &str) -> Option<RosterSnapshot> {
        self.inner.get(date).await
    }

    pub async fn replace(&self, date: &str, roster: Vec<RosterEntry>) -> RosterSnapshot {
        let snapshot = Arc::new(roster);
        self.inner.insert(date.to_string(), snapshot.clone()).await;
        snapshot
    }

    /// Reflects an accepted write on the cached roster for `date`.
    ///
    /// Returns `None` when no snapshot is held; the caller reconciles a fresh one.
    /// Concurrent updates to the same date are serialized by the cache entry.
    pub async fn apply_optimistic(
        &self,
        date: &str,
        employee_id: &str,
        status: AttendanceStatus,
    ) -> Option<RosterSnapshot> {
        let result = self
            .inner
            .entry(date.to_string())
            .and_compute_with(|current| {
                ready(match current {
                    Some(entry) => Op::Put(Arc::new(apply_status_update(
                        entry.value(),
                        employee_id,
                        status,
                    ))),
                    None => Op::Nop,
                })
            })
            .await;

        match result {
            CompResult::ReplacedWith(entry) | CompResult::Inserted(entry) => {
                Some(entry.into_value())
            }
            _ => None,
        }
    }

    /// Drop every snapshot (the employee set changed)
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}
