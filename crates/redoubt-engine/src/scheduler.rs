//! Scheduler: bounded worker pool that fills Segment Cache entries for a
//! batch of needed keys.
//!
//! Each worker runs the Segment Enumerator for one key on the blocking pool
//! (the DFS is CPU-bound and synchronous), then writes through the
//! crash-safe cache protocol and moves the key from `working` to `ready`.
//! Already-cached keys are skipped entirely — this is what lets an
//! interrupted run resume instead of recomputing completed keys.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use redoubt_core::error::EngineError;
use redoubt_core::types::{Budgets, SegmentEntry, SegmentKey};
use redoubt_graph::GraphStore;

use crate::cache::SegmentCache;
use crate::enumerator;

/// Outcome of one `fill` call: keys whose artifacts are now finalized on
/// disk, and keys that failed (with a human-readable reason) and were not
/// written. A failed key is left absent so a later run retries it.
#[derive(Debug, Default)]
pub struct SchedulerReport {
    pub ready: Vec<SegmentKey>,
    pub failed: Vec<(SegmentKey, String)>,
}

pub struct Scheduler {
    store: Arc<GraphStore>,
    cache: Arc<SegmentCache>,
    budgets: Budgets,
    concurrency: Arc<Semaphore>,
}

impl Scheduler {
    /// `worker_count` should be `max(1, cpu_count - reserved_processors)`;
    /// see [`redoubt_core::config::EngineConfig::worker_pool_size`].
    pub fn new(store: GraphStore, cache: SegmentCache, budgets: Budgets, worker_count: usize) -> Self {
        Self {
            store: Arc::new(store),
            cache: Arc::new(cache),
            budgets,
            concurrency: Arc::new(Semaphore::new(worker_count.max(1))),
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Ensure every key in `keys` has a cache entry, deduplicated. Keys
    /// already present in the cache are skipped (the `waiting` set is just
    /// the not-yet-cached subset); the rest are dispatched to the worker
    /// pool up to its concurrency limit.
    pub async fn fill(&self, keys: Vec<SegmentKey>) -> SchedulerReport {
        let mut waiting = Vec::new();
        let mut seen = HashSet::new();
        for key in keys {
            if !seen.insert(key.clone()) {
                continue;
            }
            match self.cache.get(&key, &self.store) {
                Ok(Some(_)) => tracing::debug!(%key, "segment already cached, skipping"),
                Ok(None) => waiting.push(key),
                Err(e) => {
                    tracing::warn!(%key, error = %e, "cache lookup failed, treating as uncached");
                    waiting.push(key);
                }
            }
        }

        let mut report = SchedulerReport::default();
        if waiting.is_empty() {
            return report;
        }

        tracing::info!(waiting = waiting.len(), "scheduler dispatching segment keys");

        let mut working: JoinSet<(SegmentKey, SegmentEntry)> = JoinSet::new();
        for key in waiting {
            let permit = self
                .concurrency
                .clone()
                .acquire_owned()
                .await
                .expect("semaphore is never closed");
            let store = self.store.clone();
            let budgets = self.budgets;
            let key_for_task = key.clone();

            working.spawn(async move {
                let _permit = permit;
                let entry = match (store.index_of(&key_for_task.from), store.index_of(&key_for_task.to)) {
                    (Some(from), Some(to)) => {
                        tokio::task::spawn_blocking(move || enumerator::enumerate(&store, from, to, &budgets))
                            .await
                            .unwrap_or_else(|e| {
                                tracing::error!(error = %e, "enumerator worker panicked");
                                SegmentEntry::default()
                            })
                    }
                    _ => {
                        let unknown = if store.index_of(&key_for_task.from).is_none() {
                            key_for_task.from.0.clone()
                        } else {
                            key_for_task.to.0.clone()
                        };
                        let err = EngineError::UnknownNode(unknown);
                        tracing::warn!(%key_for_task, error = %err, "segment key references an unknown node");
                        SegmentEntry::default()
                    }
                };
                (key_for_task, entry)
            });
        }

        while let Some(joined) = working.join_next().await {
            let (key, entry) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::error!(error = %e, "scheduler worker task failed to join");
                    continue;
                }
            };
            let put_result = self.cache.put(&key, &entry, &self.store).or_else(|first_err| {
                tracing::warn!(%key, error = %first_err, "cache write failed, retrying once");
                self.cache.put(&key, &entry, &self.store)
            });

            match put_result {
                Ok(()) => {
                    tracing::debug!(%key, paths = entry.paths.len(), "segment key moved to ready");
                    report.ready.push(key);
                }
                Err(source) => {
                    let err = EngineError::CacheIo {
                        from: key.from.0.clone(),
                        to: key.to.0.clone(),
                        source,
                    };
                    // The key is left absent from the cache, which is what
                    // lets a later `fill` call re-enqueue and retry it.
                    tracing::error!(%key, error = %err, "cache write failed after retry, leaving segment key uncached");
                    report.failed.push((key, err.to_string()));
                }
            }
        }

        report
    }
}
