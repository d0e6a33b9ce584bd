//! In-memory `RemoteClient` for tests
//!
//! Reads are answered from per-table scripts first and fall back to fixed
//! rows; writes echo the record back unless a result was scripted. Every call
//! is recorded so tests can assert on what reached the remote side.

use crate::errors::RemoteError;
use crate::id_type::RecordId;
use crate::query_builder::SelectQuery;
use crate::remote::{Record, RemoteClient};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

type Response = Result<Vec<Value>, RemoteError>;

/// A call that reached the scripted client
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Select(SelectQuery),
    Insert { table: String, record: Record },
    Update { table: String, record: Record, id: RecordId },
    Delete { table: String, id: RecordId },
    Upsert { table: String, record: Record },
}

impl RemoteCall {
    pub fn table(&self) -> &str {
        match self {
            RemoteCall::Select(query) => &query.table,
            RemoteCall::Insert { table, .. }
            | RemoteCall::Update { table, .. }
            | RemoteCall::Delete { table, .. }
            | RemoteCall::Upsert { table, .. } => table,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, RemoteCall::Select(_))
    }
}

#[derive(Debug)]
pub struct ScriptedClient {
    available: AtomicBool,
    latency: Mutex<Duration>,
    rows: Mutex<HashMap<String, Vec<Value>>>,
    selects: Mutex<HashMap<String, VecDeque<Response>>>,
    writes: Mutex<VecDeque<Response>>,
    calls: Mutex<Vec<RemoteCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for ScriptedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
            latency: Mutex::new(Duration::ZERO),
            rows: Mutex::new(HashMap::new()),
            selects: Mutex::new(HashMap::new()),
            writes: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Rows returned for every select on `table` once its script is used up
    pub fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        lock(&self.rows).insert(table.to_string(), rows);
        self
    }

    /// Queue the response for the next select on `table`
    pub fn push_select(&self, table: &str, response: Response) {
        lock(&self.selects)
            .entry(table.to_string())
            .or_default()
            .push_back(response);
    }

    /// Queue the response for the next write, whatever the table
    pub fn push_write(&self, response: Response) {
        lock(&self.writes).push_back(response);
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Delay every call by `latency` before answering
    pub fn set_latency(&self, latency: Duration) {
        *lock(&self.latency) = latency;
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        lock(&self.calls).clone()
    }

    pub fn select_count(&self, table: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.is_select() && c.table() == table)
            .count()
    }

    pub fn write_count(&self) -> usize {
        lock(&self.calls).iter().filter(|c| !c.is_select()).count()
    }

    async fn record(&self, call: RemoteCall) {
        lock(&self.calls).push(call);
        let latency = *lock(&self.latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn write_response(&self, record: Option<&Record>) -> Response {
        match lock(&self.writes).pop_front() {
            Some(response) => response,
            None => Ok(record
                .map(|r| vec![Value::Object(r.clone())])
                .unwrap_or_default()),
        }
    }
}

#[async_trait]
impl RemoteClient for ScriptedClient {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, RemoteError> {
        self.record(RemoteCall::Select(query.clone())).await;

        let scripted = lock(&self.selects)
            .get_mut(&query.table)
            .and_then(VecDeque::pop_front);
        match scripted {
            Some(response) => response,
            None => Ok(lock(&self.rows)
                .get(&query.table)
                .cloned()
                .unwrap_or_default()),
        }
    }

    async fn insert(&self, table: &str, record: &Record) -> Result<Vec<Value>, RemoteError> {
        self.record(RemoteCall::Insert {
            table: table.to_string(),
            record: record.clone(),
        })
        .await;
        self.write_response(Some(record))
    }

    async fn update(
        &self,
        table: &str,
        record: &Record,
        id: &RecordId,
    ) -> Result<Vec<Value>, RemoteError> {
        self.record(RemoteCall::Update {
            table: table.to_string(),
            record: record.clone(),
            id: id.clone(),
        })
        .await;
        self.write_response(Some(record))
    }

    async fn delete(&self, table: &str, id: &RecordId) -> Result<Vec<Value>, RemoteError> {
        self.record(RemoteCall::Delete {
            table: table.to_string(),
            id: id.clone(),
        })
        .await;
        self.write_response(None)
    }

    async fn upsert(&self, table: &str, record: &Record) -> Result<Vec<Value>, RemoteError> {
        self.record(RemoteCall::Upsert {
            table: table.to_string(),
            record: record.clone(),
        })
        .await;
        self.write_response(Some(record))
    }
}
