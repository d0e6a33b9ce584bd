//! Cache system for query results
//!
//! This crate provides the in-process read cache used by the data manager:
//! a TTL keyed store, deterministic query keys and de-duplication of
//! concurrent identical requests.

pub mod errors;
pub mod in_flight;
pub mod key;
pub mod prelude;
pub mod store;

// Re-export centralized config
pub use config::CacheConfig;

pub use errors::CacheError;
pub use in_flight::InFlightTracker;
pub use key::CacheKey;
pub use store::{CacheEntry, CacheStore, DEFAULT_TTL};
