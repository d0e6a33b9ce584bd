//! Convenience re-exports for common LigaHaus usage
//!
//! ```rust
//! use ligahaus::prelude::*;
//! ```

// Core LigaHaus components
pub use crate::core::LigaHaus;
pub use crate::errors::LigaHausError;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, DatabaseConfig, RetryConfig};

// Data manager, queries, validation and errors
pub use store_object::prelude::*;

// Re-export signal system for event handling
pub use signal_system::prelude::*;

// Re-export cache system
pub use cache_system::prelude::*;
