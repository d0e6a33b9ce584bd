use crate::errors::DataError;
use crate::remote::RemoteClient;
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::validation::Validator;
use cache_system::{CacheStore, InFlightTracker};
use config::AppConfig;
use serde_json::Value;
use signal_system::{DatabaseEvent, SignalManager};
use std::sync::Arc;
use std::time::Duration;

/// Retry policy and cache lifetime for a `DataManager`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataManagerConfig {
    pub retry: RetryPolicy,
    pub cache_ttl: Duration,
}

impl Default for DataManagerConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            cache_ttl: cache_system::DEFAULT_TTL,
        }
    }
}

impl DataManagerConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            retry: RetryPolicy::from_config(&config.retry),
            cache_ttl: config.cache.ttl_duration(),
        }
    }
}

/// Read and write entry point for UI code
///
/// One instance owns its cache and its in-flight map; tests and separate
/// sessions get isolated state by constructing their own.
pub struct DataManager {
    pub(crate) client: Arc<dyn RemoteClient>,
    pub(crate) cache: Arc<CacheStore<Vec<Value>>>,
    pub(crate) in_flight: InFlightTracker<Vec<Value>, DataError>,
    pub(crate) retry: RetryExecutor,
    pub(crate) validator: Validator,
    pub(crate) signal_manager: Option<Arc<SignalManager>>,
}

impl std::fmt::Debug for DataManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataManager")
            .field("available", &self.client.is_available())
            .field("cached_entries", &self.cache.len())
            .field("pending_requests", &self.in_flight.pending_count())
            .field("retry", self.retry.policy())
            .field("has_signals", &self.has_signals())
            .finish()
    }
}

impl DataManager {
    pub fn new(client: Arc<dyn RemoteClient>, config: DataManagerConfig) -> Self {
        Self {
            client,
            cache: Arc::new(CacheStore::with_default_ttl(config.cache_ttl)),
            in_flight: InFlightTracker::new(),
            retry: RetryExecutor::new(config.retry),
            validator: Validator::with_defaults(),
            signal_manager: None,
        }
    }

    /// Replace the default table rules
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_signal_manager(mut self, signal_manager: Arc<SignalManager>) -> Self {
        self.signal_manager = Some(signal_manager);
        self
    }

    pub fn has_signals(&self) -> bool {
        self.signal_manager.is_some()
    }

    pub fn signal_manager(&self) -> Option<&Arc<SignalManager>> {
        self.signal_manager.as_ref()
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn is_available(&self) -> bool {
        self.client.is_available()
    }

    /// Drop cached results whose key contains `pattern`, or everything for `None`
    pub fn invalidate_cache(&self, pattern: Option<&str>) -> usize {
        self.cache.invalidate(pattern)
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn pending_requests(&self) -> usize {
        self.in_flight.pending_count()
    }

    pub(crate) fn emit_signal(&self, event: DatabaseEvent) {
        if let Some(signal_manager) = &self.signal_manager {
            signal_manager.emit(&event);
        }
    }
}
