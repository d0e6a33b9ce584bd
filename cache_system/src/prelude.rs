//! Convenience re-exports for common cache-system usage

// Core cache system components
pub use crate::errors::CacheError;
pub use crate::in_flight::InFlightTracker;
pub use crate::key::CacheKey;
pub use crate::store::{CacheEntry, CacheStore, DEFAULT_TTL};

// Re-export centralized config
pub use config::CacheConfig;
