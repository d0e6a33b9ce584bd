//! Query result store
//!
//! This module provides the CacheStore struct, a keyed map of query results
//! where every entry carries its own expiry instant.

use config::CacheConfig;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Lifetime of an entry stored without an explicit TTL
pub const DEFAULT_TTL: Duration = Duration::from_millis(30_000);

/// A cached value together with the instant it stops being valid
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

struct State<V> {
    entries: HashMap<String, CacheEntry<V>>,
    generation: u64,
    // last generation at which each pattern was invalidated
    invalidated: HashMap<String, u64>,
    cleared_at: u64,
}

impl<V> State<V> {
    fn invalidated_since(&self, key: &str, since: u64) -> bool {
        self.cleared_at > since
            || self
                .invalidated
                .iter()
                .any(|(pattern, at)| *at > since && key.contains(pattern.as_str()))
    }
}

/// In-memory TTL store for query results
///
/// Expired entries are only dropped when they are read or explicitly invalidated;
/// there is no size bound and no background sweeping.
///
/// Every invalidation advances a generation counter. A reader that captured
/// [`CacheStore::generation`] before fetching can store its result with
/// [`CacheStore::set_default_since`], which refuses keys invalidated meanwhile.
pub struct CacheStore<V = serde_json::Value> {
    state: Mutex<State<V>>,
    default_ttl: Duration,
}

impl<V: Clone> Debug for CacheStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("entries", &self.len())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl<V: Clone> CacheStore<V> {
    /// Create a store with the default 30 second TTL
    pub fn new() -> Self {
        Self::with_default_ttl(DEFAULT_TTL)
    }

    pub fn with_default_ttl(default_ttl: Duration) -> Self {
        Self {
            state: Mutex::new(State {
                entries: HashMap::new(),
                generation: 0,
                invalidated: HashMap::new(),
                cleared_at: 0,
            }),
            default_ttl,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_default_ttl(config.ttl_duration())
    }

    fn state(&self) -> MutexGuard<'_, State<V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a value if it has not expired yet; an expired entry is removed
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut state = self.state();
        let entries = &mut state.entries;

        match entries.get(key) {
            Some(entry) if entry.is_fresh(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                tracing::debug!(key, "cache entry expired");
                None
            }
            None => None,
        }
    }

    /// Store a value, replacing any previous entry for the key
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.state().entries.insert(key.into(), entry);
    }

    /// Store a value with the store's default TTL
    pub fn set_default(&self, key: impl Into<String>, value: V) {
        self.set(key, value, self.default_ttl);
    }

    /// Current invalidation generation
    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    /// Store a value with the default TTL unless its key was invalidated after
    /// `generation`. Returns whether the value was stored.
    pub fn set_default_since(&self, key: impl Into<String>, value: V, generation: u64) -> bool {
        let key = key.into();
        let mut state = self.state();
        if state.invalidated_since(&key, generation) {
            tracing::debug!(key = %key, "discarding result invalidated while in flight");
            return false;
        }
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.default_ttl,
        };
        state.entries.insert(key, entry);
        true
    }

    /// Remove every key containing `pattern`, or everything when `pattern` is None.
    /// Returns the number of removed entries.
    pub fn invalidate(&self, pattern: Option<&str>) -> usize {
        let mut state = self.state();
        state.generation += 1;
        let generation = state.generation;
        let before = state.entries.len();

        match pattern {
            Some(pattern) => {
                state.entries.retain(|key, _| !key.contains(pattern));
                state.invalidated.insert(pattern.to_string(), generation);
            }
            None => {
                state.entries.clear();
                state.invalidated.clear();
                state.cleared_at = generation;
            }
        }

        let removed = before - state.entries.len();
        tracing::debug!(pattern = ?pattern, removed, "cache invalidated");
        removed
    }

    /// Number of stored entries, including expired ones not yet read
    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().entries.is_empty()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
