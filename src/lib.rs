//! # LigaHaus
//!
//! Data-access layer for a match, player and finance tracker on PostgreSQL:
//! cached reads with request de-duplication, retried remote calls and
//! validated, sanitized writes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ligahaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let liga = LigaHaus::from_env().await?;
//!     let data = liga.data();
//!
//!     let aek = data
//!         .select("players", "*", SelectOptions::new().eq("team", "AEK").order("name", true))
//!         .await?;
//!     println!("{} players, cached: {}", aek.data.len(), aek.from_cache);
//!
//!     let mut ban = Record::new();
//!     ban.insert("player_id".into(), json!(7));
//!     ban.insert("team".into(), json!("AEK"));
//!     ban.insert("type".into(), json!("Rote Karte"));
//!     ban.insert("totalgames".into(), json!(2));
//!     data.insert("bans", ban).await?;
//!
//!     let snapshot = data.load_all_app_data().await;
//!     println!("{} matches", snapshot.matches.len());
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::LigaHaus;
pub use errors::LigaHausError;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, DatabaseConfig, RetryConfig};

// Re-export internal crates used by the public API
pub use cache_system;
pub use signal_system;
pub use store_object;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
