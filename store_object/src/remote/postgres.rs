//! PostgreSQL remote client

use super::{Record, RemoteClient};
use crate::errors::{RemoteError, RemoteErrorKind};
use crate::id_type::RecordId;
use crate::query_builder::{SelectQuery, SqlGenerator, SqlStatement};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

/// `RemoteClient` backed by a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgRemoteClient {
    pool: PgPool,
}

impl PgRemoteClient {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch(
        &self,
        statement: SqlStatement,
        extra: Option<String>,
    ) -> Result<Vec<Value>, RemoteError> {
        tracing::debug!("[PG] SQL: {}", statement.sql);

        let mut query = sqlx::query_scalar::<_, Value>(&statement.sql);
        for param in statement.params {
            query = query.bind(param);
        }
        if let Some(extra) = extra {
            query = query.bind(extra);
        }

        query.fetch_all(&self.pool).await.map_err(map_sqlx_error)
    }
}

#[async_trait]
impl RemoteClient for PgRemoteClient {
    fn is_available(&self) -> bool {
        !self.pool.is_closed()
    }

    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, RemoteError> {
        let statement = SqlGenerator::select(query)?;
        self.fetch(statement, None).await
    }

    async fn insert(&self, table: &str, record: &Record) -> Result<Vec<Value>, RemoteError> {
        let statement = SqlGenerator::insert(table, record)?;
        self.fetch(statement, None).await
    }

    async fn update(
        &self,
        table: &str,
        record: &Record,
        id: &RecordId,
    ) -> Result<Vec<Value>, RemoteError> {
        let statement = SqlGenerator::update(table, record)?;
        self.fetch(statement, Some(id.to_string())).await
    }

    async fn delete(&self, table: &str, id: &RecordId) -> Result<Vec<Value>, RemoteError> {
        let statement = SqlGenerator::delete(table)?;
        self.fetch(statement, Some(id.to_string())).await
    }

    async fn upsert(&self, table: &str, record: &Record) -> Result<Vec<Value>, RemoteError> {
        let statement = SqlGenerator::upsert(table, record)?;
        self.fetch(statement, None).await
    }
}

/// Classify a sqlx error by SQLSTATE or failure type
pub fn map_sqlx_error(err: sqlx::Error) -> RemoteError {
    match err {
        sqlx::Error::Database(db) => {
            let message = db.message().to_string();
            match db.code() {
                Some(code) => RemoteError::new(kind_for_sqlstate(&code), message).with_code(code),
                None => RemoteError::unclassified(message),
            }
        }
        sqlx::Error::RowNotFound => RemoteError::new(RemoteErrorKind::NotFound, err.to_string()),
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_) => RemoteError::transient(err.to_string()),
        _ => RemoteError::unclassified(err.to_string()),
    }
}

fn kind_for_sqlstate(code: &str) -> RemoteErrorKind {
    match code {
        "42501" => RemoteErrorKind::Permission,
        "42P01" => RemoteErrorKind::NotFound,
        "42703" | "42601" | "22P02" => RemoteErrorKind::InvalidRequest,
        "57P01" | "40001" | "40P01" => RemoteErrorKind::Transient,
        c if c.starts_with("28") => RemoteErrorKind::Auth,
        c if c.starts_with("23") => RemoteErrorKind::Constraint,
        c if c.starts_with("08") || c.starts_with("53") => RemoteErrorKind::Transient,
        _ => RemoteErrorKind::Unclassified,
    }
}
