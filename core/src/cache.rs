//! Time-windowed memoization for every generated dataset.
//!
//! RULE: Only the CacheStore touches cached entries. Generators never
//! read or write cache state; the engine asks the store, and the store
//! either returns a fresh-enough value or recomputes under its lock.
//!
//! Freshness semantics:
//!   - Each dataset has one window; expiry discards the whole entry.
//!     There is no partial invalidation.
//!   - The lock is held across recomputation, so at most one
//!     recomputation runs per map at a time — a cache miss can never
//!     race another miss for the same key into duplicate randomness.
//!   - `replace` swaps a value in atomically and restarts its window;
//!     reads inside that window observe the replaced value.

use crate::{
    brackets::RevenueBracketRecord,
    category::{CategoryCode, TaxCategory},
    comparison::ComparisonRecord,
    history::HistoricalRecord,
    snapshot::CurrentRecord,
    territory::TerritoryCode,
};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-dataset freshness windows. Defaults mirror the catalog/series/
/// snapshot cadence: catalogs barely change, snapshots are "live".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreshnessPolicy {
    pub categories: Duration,
    pub history:    Duration,
    pub snapshot:   Duration,
    pub brackets:   Duration,
    pub comparison: Duration,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            categories: Duration::from_secs(3_600),
            history:    Duration::from_secs(1_800),
            snapshot:   Duration::from_secs(300),
            brackets:   Duration::from_secs(600),
            comparison: Duration::from_secs(3_600),
        }
    }
}

impl FreshnessPolicy {
    /// Zero every window: each read recomputes. Test hook.
    pub fn always_stale() -> Self {
        Self {
            categories: Duration::ZERO,
            history:    Duration::ZERO,
            snapshot:   Duration::ZERO,
            brackets:   Duration::ZERO,
            comparison: Duration::ZERO,
        }
    }
}

struct Entry<V> {
    value:       V,
    inserted_at: Instant,
}

/// A mutex-guarded map of key -> (value, insertion time) with lazy
/// expiry on read.
pub struct TtlMap<K, V> {
    window:  Duration,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlMap<K, V> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<K, Entry<V>>> {
        // A poisoned lock only means a recomputation panicked; the map
        // contents are still replaceable values, so keep serving.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the cached value for `key`, or recompute it under the
    /// lock. An expired entry is discarded and rebuilt wholesale.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        let mut entries = self.lock();

        if let Some(entry) = entries.get(&key) {
            if entry.inserted_at.elapsed() < self.window {
                return Ok(entry.value.clone());
            }
            entries.remove(&key);
        }

        let value = compute()?;
        entries.insert(key, Entry { value: value.clone(), inserted_at: Instant::now() });
        Ok(value)
    }

    /// Infallible variant of `get_or_try_insert_with`.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> V {
        let result: Result<V, std::convert::Infallible> =
            self.get_or_try_insert_with(key, || Ok(compute()));
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Swap a value in atomically, restarting its freshness window.
    pub fn replace(&self, key: K, value: V) {
        self.lock().insert(key, Entry { value, inserted_at: Instant::now() });
    }

    /// True if `key` holds an unexpired entry.
    pub fn is_fresh(&self, key: &K) -> bool {
        self.lock()
            .get(key)
            .map(|e| e.inserted_at.elapsed() < self.window)
            .unwrap_or(false)
    }

    /// Drop every entry, fresh or not.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// The single owner of every cached dataset for one session. Created
/// with the engine, dropped with the process; entries are evicted lazily
/// on expired reads.
pub struct CacheStore {
    pub categories: TtlMap<TerritoryCode, BTreeMap<CategoryCode, TaxCategory>>,
    pub history:    TtlMap<TerritoryCode, Vec<HistoricalRecord>>,
    pub snapshot:   TtlMap<TerritoryCode, Vec<CurrentRecord>>,
    pub brackets:   TtlMap<TerritoryCode, Vec<RevenueBracketRecord>>,
    /// Whole-catalog operation; keyed by the unit value.
    pub comparison: TtlMap<(), Vec<ComparisonRecord>>,
}

impl CacheStore {
    pub fn new(policy: FreshnessPolicy) -> Self {
        Self {
            categories: TtlMap::new(policy.categories),
            history:    TtlMap::new(policy.history),
            snapshot:   TtlMap::new(policy.snapshot),
            brackets:   TtlMap::new(policy.brackets),
            comparison: TtlMap::new(policy.comparison),
        }
    }

    /// Drop every cached dataset.
    pub fn clear(&self) {
        self.categories.clear();
        self.history.clear();
        self.snapshot.clear();
        self.brackets.clear();
        self.comparison.clear();
    }
}
