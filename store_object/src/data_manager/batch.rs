//! Batched reads and the full application snapshot

use super::core::DataManager;
use crate::errors::DataError;
use crate::query_builder::SelectOptions;
use crate::tables;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One named select inside a batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub key: String,
    pub table: String,
    pub projection: String,
    pub options: SelectOptions,
}

impl BatchRequest {
    /// Request all columns of `table`, keyed by the table name
    pub fn table(table: &str) -> Self {
        Self {
            key: table.to_string(),
            table: table.to_string(),
            projection: "*".to_string(),
            options: SelectOptions::default(),
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    pub fn with_projection(mut self, projection: &str) -> Self {
        self.projection = projection.to_string();
        self
    }

    pub fn with_options(mut self, options: SelectOptions) -> Self {
        self.options = options;
        self
    }
}

/// Result of one batch entry; failures are reported here instead of failing the batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub key: String,
    pub success: bool,
    pub data: Option<Vec<Value>>,
    pub error: Option<DataError>,
}

/// Every table the application loads at start-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub matches: Vec<Value>,
    pub players: Vec<Value>,
    pub bans: Vec<Value>,
    pub finances: Vec<Value>,
    pub transactions: Vec<Value>,
    pub spieler_des_spiels: Vec<Value>,
    pub managers: Vec<Value>,
}

impl DataManager {
    /// Run independent selects concurrently; outcomes keep the request order
    pub async fn batched_select(&self, requests: Vec<BatchRequest>) -> Vec<BatchOutcome> {
        let selects = requests.into_iter().map(|request| async move {
            let result = self
                .select(&request.table, &request.projection, request.options)
                .await;
            match result {
                Ok(result) => BatchOutcome {
                    key: request.key,
                    success: true,
                    data: Some(result.data),
                    error: None,
                },
                Err(e) => BatchOutcome {
                    key: request.key,
                    success: false,
                    data: None,
                    error: Some(e),
                },
            }
        });

        join_all(selects).await
    }

    /// Load every application table in one batch
    ///
    /// A table that fails to load is logged and returned empty. Goal lists of
    /// matches are decoded from their JSON text form.
    pub async fn load_all_app_data(&self) -> AppData {
        let requests = vec![
            BatchRequest::table(tables::MATCHES)
                .with_options(SelectOptions::new().order("date", false)),
            BatchRequest::table(tables::PLAYERS)
                .with_options(SelectOptions::new().order("name", true)),
            BatchRequest::table(tables::BANS),
            BatchRequest::table(tables::FINANCES),
            BatchRequest::table(tables::TRANSACTIONS)
                .with_options(SelectOptions::new().order("date", false)),
            BatchRequest::table(tables::PLAYER_OF_THE_MATCH),
            BatchRequest::table(tables::MANAGERS),
        ];

        let mut data = AppData::default();
        for outcome in self.batched_select(requests).await {
            let rows = match (outcome.data, outcome.error) {
                (Some(rows), _) if outcome.success => rows,
                (_, error) => {
                    tracing::error!(
                        table = %outcome.key,
                        error = ?error,
                        "Failed to load table, using empty data"
                    );
                    Vec::new()
                }
            };

            match outcome.key.as_str() {
                tables::MATCHES => data.matches = rows.into_iter().map(normalize_goal_lists).collect(),
                tables::PLAYERS => data.players = rows,
                tables::BANS => data.bans = rows,
                tables::FINANCES => data.finances = rows,
                tables::TRANSACTIONS => data.transactions = rows,
                tables::PLAYER_OF_THE_MATCH => data.spieler_des_spiels = rows,
                tables::MANAGERS => data.managers = rows,
                _ => {}
            }
        }

        data
    }
}

/// Replace the goal list fields of a match row by JSON arrays
///
/// Text is parsed, arrays are kept, anything else becomes `[]`.
pub fn normalize_goal_lists(mut row: Value) -> Value {
    if let Value::Object(fields) = &mut row {
        for field in tables::GOAL_LIST_FIELDS {
            let list = match fields.get(field) {
                Some(Value::Array(items)) => Value::Array(items.clone()),
                Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
                    Ok(Value::Array(items)) => Value::Array(items),
                    _ => Value::Array(Vec::new()),
                },
                _ => Value::Array(Vec::new()),
            };
            fields.insert(field.to_string(), list);
        }
    }
    row
}
