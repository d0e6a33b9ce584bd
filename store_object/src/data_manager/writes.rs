use super::core::DataManager;
use crate::errors::{DataError, DataResult};
use crate::id_type::RecordId;
use crate::query_builder::sql_generation::ID_COLUMN;
use crate::remote::Record;
use crate::sanitize::sanitize;
use crate::validation::ValidatedTableName;
use serde_json::Value;
use signal_system::{DatabaseEvent, EventType};

impl DataManager {
    /// Insert one record into `table`
    pub async fn insert(&self, table: &str, data: Record) -> DataResult<Vec<Value>> {
        let record = self.prepare(table, &data)?;
        let client = &self.client;

        let rows = self
            .retry
            .run(client.is_available(), || client.insert(table, &record))
            .await?;

        self.after_write(EventType::Create, table, record_id(&record, &rows), &rows);
        Ok(rows)
    }

    /// Update the row of `table` identified by `id`
    pub async fn update(
        &self,
        table: &str,
        data: Record,
        id: impl Into<RecordId>,
    ) -> DataResult<Vec<Value>> {
        let id = require_id(id.into(), "update")?;
        let record = self.prepare(table, &data)?;
        let client = &self.client;

        let rows = self
            .retry
            .run(client.is_available(), || client.update(table, &record, &id))
            .await?;

        self.after_write(EventType::Update, table, Some(id), &rows);
        Ok(rows)
    }

    /// Delete the row of `table` identified by `id`
    pub async fn delete(&self, table: &str, id: impl Into<RecordId>) -> DataResult<Vec<Value>> {
        let id = require_id(id.into(), "delete")?;
        ValidatedTableName::new(table)?;
        let client = &self.client;

        let rows = self
            .retry
            .run(client.is_available(), || client.delete(table, &id))
            .await?;

        self.after_write(EventType::Delete, table, Some(id), &rows);
        Ok(rows)
    }

    /// Insert `data`, or update the existing row with the same id
    pub async fn upsert(&self, table: &str, data: Record) -> DataResult<Vec<Value>> {
        let record = self.prepare(table, &data)?;
        let client = &self.client;

        let rows = self
            .retry
            .run(client.is_available(), || client.upsert(table, &record))
            .await?;

        self.after_write(EventType::Upsert, table, record_id(&record, &rows), &rows);
        Ok(rows)
    }

    /// Sanitize then validate a record bound for `table`
    fn prepare(&self, table: &str, data: &Record) -> DataResult<Record> {
        ValidatedTableName::new(table)?;
        let record = sanitize(data);

        let result = self.validator.validate(table, &record);
        if !result.valid {
            tracing::debug!(table, errors = ?result.errors, "record rejected");
            return Err(DataError::Validation(result.errors));
        }

        Ok(record)
    }

    fn after_write(
        &self,
        event_type: EventType,
        table: &str,
        id: Option<RecordId>,
        rows: &[Value],
    ) {
        self.invalidate_cache(Some(table));

        if self.has_signals() {
            let mut event =
                DatabaseEvent::new(event_type, table).with_payload(Value::Array(rows.to_vec()));
            if let Some(id) = id {
                event = event.with_record_id(id.to_string());
            }
            self.emit_signal(event);
        }
    }
}

fn require_id(id: RecordId, operation: &'static str) -> DataResult<RecordId> {
    if id.is_blank() {
        return Err(DataError::MissingId { operation });
    }
    Ok(id)
}

/// Id of a written row: from the record itself, else from the first returned row
fn record_id(record: &Record, rows: &[Value]) -> Option<RecordId> {
    record
        .get(ID_COLUMN)
        .and_then(RecordId::from_value)
        .or_else(|| {
            rows.first()
                .and_then(|row| row.get(ID_COLUMN))
                .and_then(RecordId::from_value)
        })
}
