//! Convenience re-exports for common store-object usage

// Data manager
pub use crate::data_manager::{
    AppData, BatchOutcome, BatchRequest, DataManager, DataManagerConfig, SelectResult,
};

// Error types
pub use crate::errors::{DataError, DataResult, RemoteError, RemoteErrorKind};

// Record ids and rows
pub use crate::id_type::RecordId;
pub use crate::remote::{PgRemoteClient, Record, RemoteClient};

// Query building
pub use crate::query_builder::{SelectOptions, SelectQuery};

// Validation
pub use crate::validation::{FieldRule, TableRules, ValidationResult, Validator};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde_json::{json, Value};
pub use sqlx::PgPool;
