//! Remote client seam
//!
//! The data manager never talks to a database directly. Everything goes
//! through `RemoteClient`, which takes a table name, a projection and options
//! and returns rows as JSON. `PgRemoteClient` is the PostgreSQL implementation.

pub mod postgres;

use crate::errors::RemoteError;
use crate::id_type::RecordId;
use crate::query_builder::SelectQuery;
use async_trait::async_trait;
use serde_json::Value;

pub use postgres::PgRemoteClient;

/// A row as sent to or received from the remote store
pub type Record = serde_json::Map<String, Value>;

/// Row-oriented access to the remote store
///
/// Write operations return the affected rows as the store reports them.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Whether a connection is configured at all; checked before every operation
    fn is_available(&self) -> bool;

    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, RemoteError>;

    async fn insert(&self, table: &str, record: &Record) -> Result<Vec<Value>, RemoteError>;

    async fn update(
        &self,
        table: &str,
        record: &Record,
        id: &RecordId,
    ) -> Result<Vec<Value>, RemoteError>;

    async fn delete(&self, table: &str, id: &RecordId) -> Result<Vec<Value>, RemoteError>;

    async fn upsert(&self, table: &str, record: &Record) -> Result<Vec<Value>, RemoteError>;
}
