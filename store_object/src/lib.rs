//! Store Object - data access layer for the LigaHaus tracker
//!
//! This crate provides the query model, the remote client seam with its
//! PostgreSQL implementation, record validation and sanitization, the retry
//! executor and the `DataManager` that composes them with the result cache.

pub mod data_manager;
pub mod errors;
pub mod id_type;
pub mod prelude;
pub mod query_builder;
pub mod remote;
pub mod retry;
pub mod sanitize;
pub mod tables;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use data_manager::{
    AppData, BatchOutcome, BatchRequest, DataManager, DataManagerConfig, SelectResult,
};
pub use errors::{DataError, DataResult, RemoteError, RemoteErrorKind};
pub use id_type::RecordId;
pub use query_builder::{OrderBy, RowRange, SelectOptions, SelectQuery, SortOrder};
pub use remote::{PgRemoteClient, Record, RemoteClient};
pub use retry::{IsRetryable, RetryExecutor, RetryPolicy};
pub use validation::{
    FieldRule, TableRules, ValidatedFieldName, ValidatedTableName, ValidationError,
    ValidationResult, Validator,
};

use sqlx::PgPool;

pub type DbPool = PgPool;
