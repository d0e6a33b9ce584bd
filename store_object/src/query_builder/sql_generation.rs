//! SQL generation for the PostgreSQL client
//!
//! Every statement returns its rows as `jsonb`, one row per result row, so the
//! client can decode everything as `serde_json::Value`. Written records are
//! bound as a single `jsonb` parameter and expanded with
//! `jsonb_populate_record`, which lets PostgreSQL apply the column types.

use crate::errors::RemoteError;
use crate::query_builder::builder::SelectQuery;
use crate::remote::Record;
use crate::validation::{ValidatedFieldName, ValidatedTableName};
use serde_json::Value;

/// Primary key column used by update, delete and upsert
pub const ID_COLUMN: &str = "id";

/// Statement text plus its positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

pub struct SqlGenerator;

impl SqlGenerator {
    /// `SELECT` for a query; filter values become `$n` jsonb parameters
    pub fn select(query: &SelectQuery) -> Result<SqlStatement, RemoteError> {
        let table = table_name(&query.table)?;
        let projection = Self::build_projection(&query.projection)?;
        let (where_clause, params) = Self::build_where_clause(query)?;
        let order_clause = Self::build_order_clause(query)?;
        let limit_clause = query.options.pagination().to_sql();

        let mut inner = format!("SELECT {} FROM {}", projection, table.quoted());
        for clause in [where_clause, order_clause, limit_clause] {
            if !clause.is_empty() {
                inner.push(' ');
                inner.push_str(&clause);
            }
        }

        Ok(SqlStatement {
            sql: format!("SELECT to_jsonb(t) FROM ({}) AS t", inner),
            params,
        })
    }

    /// `INSERT` of one record, `$1` is the record
    pub fn insert(table: &str, record: &Record) -> Result<SqlStatement, RemoteError> {
        let table = table_name(table)?;
        let columns = column_names(record)?;

        let insert = if columns.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES RETURNING *", table.quoted())
        } else {
            let list = quoted_list(&columns);
            format!(
                "INSERT INTO {t} ({c}) SELECT {c} FROM jsonb_populate_record(NULL::{t}, $1) RETURNING *",
                t = table.quoted(),
                c = list
            )
        };

        Ok(Self::returning_json(insert, record, columns.is_empty()))
    }

    /// `UPDATE` of the row with the given id; `$1` is the record, `$2` the id as text
    pub fn update(table: &str, record: &Record) -> Result<SqlStatement, RemoteError> {
        let table = table_name(table)?;
        let columns = column_names(record)?;
        if columns.is_empty() {
            return Err(RemoteError::invalid_request(format!(
                "update on {} has no columns",
                table
            )));
        }

        let assignments = columns
            .iter()
            .map(|c| format!("{col} = src.{col}", col = c.quoted()))
            .collect::<Vec<_>>()
            .join(", ");
        let update = format!(
            "UPDATE {t} SET {a} FROM jsonb_populate_record(NULL::{t}, $1) AS src WHERE {t}.\"{id}\"::text = $2 RETURNING {t}.*",
            t = table.quoted(),
            a = assignments,
            id = ID_COLUMN
        );

        Ok(Self::returning_json(update, record, false))
    }

    /// `DELETE` of the row with the given id; `$1` is the id as text
    pub fn delete(table: &str) -> Result<SqlStatement, RemoteError> {
        let table = table_name(table)?;
        let delete = format!(
            "DELETE FROM {} WHERE \"{}\"::text = $1 RETURNING *",
            table.quoted(),
            ID_COLUMN
        );

        Ok(SqlStatement {
            sql: wrap_returning(&delete),
            params: Vec::new(),
        })
    }

    /// `INSERT ... ON CONFLICT (id) DO UPDATE`; a record without id is a plain insert
    pub fn upsert(table: &str, record: &Record) -> Result<SqlStatement, RemoteError> {
        if !record.contains_key(ID_COLUMN) {
            return Self::insert(table, record);
        }

        let table = table_name(table)?;
        let columns = column_names(record)?;
        let list = quoted_list(&columns);

        let updates = columns
            .iter()
            .filter(|c| c.as_str() != ID_COLUMN)
            .map(|c| format!("{col} = EXCLUDED.{col}", col = c.quoted()))
            .collect::<Vec<_>>();
        let conflict_action = if updates.is_empty() {
            "DO NOTHING".to_string()
        } else {
            format!("DO UPDATE SET {}", updates.join(", "))
        };

        let upsert = format!(
            "INSERT INTO {t} ({c}) SELECT {c} FROM jsonb_populate_record(NULL::{t}, $1) ON CONFLICT (\"{id}\") {action} RETURNING *",
            t = table.quoted(),
            c = list,
            id = ID_COLUMN,
            action = conflict_action
        );

        Ok(Self::returning_json(upsert, record, false))
    }

    fn returning_json(statement: String, record: &Record, no_params: bool) -> SqlStatement {
        let params = if no_params {
            Vec::new()
        } else {
            vec![Value::Object(record.clone())]
        };
        SqlStatement {
            sql: wrap_returning(&statement),
            params,
        }
    }

    /// `*` or a comma separated column list
    pub fn build_projection(projection: &str) -> Result<String, RemoteError> {
        let projection = projection.trim();
        if projection.is_empty() || projection == "*" {
            return Ok("*".to_string());
        }

        projection
            .split(',')
            .map(|column| field_name(column.trim()).map(|f| f.quoted()))
            .collect::<Result<Vec<_>, _>>()
            .map(|columns| columns.join(", "))
    }

    /// Build WHERE clause from the equality filters
    pub fn build_where_clause(query: &SelectQuery) -> Result<(String, Vec<Value>), RemoteError> {
        if query.options.eq.is_empty() {
            return Ok((String::new(), Vec::new()));
        }

        let mut values = Vec::new();
        let mut param_counter = 1;
        let mut conditions = Vec::with_capacity(query.options.eq.len());

        for (column, value) in &query.options.eq {
            let field = field_name(column)?;
            if value.is_null() {
                conditions.push(format!("{} IS NULL", field.quoted()));
            } else {
                conditions.push(format!("to_jsonb({}) = ${}", field.quoted(), param_counter));
                values.push(value.clone());
                param_counter += 1;
            }
        }

        Ok((format!("WHERE {}", conditions.join(" AND ")), values))
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(query: &SelectQuery) -> Result<String, RemoteError> {
        match &query.options.order {
            Some(order) => {
                let field = field_name(&order.column)?;
                Ok(format!(
                    "ORDER BY {} {}",
                    field.quoted(),
                    order.sort_order().to_sql()
                ))
            }
            None => Ok(String::new()),
        }
    }
}

fn wrap_returning(statement: &str) -> String {
    format!(
        "WITH written AS ({}) SELECT to_jsonb(written) FROM written",
        statement
    )
}

fn table_name(name: &str) -> Result<ValidatedTableName, RemoteError> {
    ValidatedTableName::new(name)
        .map_err(|e| RemoteError::invalid_request(format!("invalid table name: {}", e)))
}

fn field_name(name: &str) -> Result<ValidatedFieldName, RemoteError> {
    ValidatedFieldName::new(name)
        .map_err(|e| RemoteError::invalid_request(format!("invalid column name: {}", e)))
}

fn column_names(record: &Record) -> Result<Vec<ValidatedFieldName>, RemoteError> {
    record.keys().map(|key| field_name(key)).collect()
}

fn quoted_list(columns: &[ValidatedFieldName]) -> String {
    columns
        .iter()
        .map(ValidatedFieldName::quoted)
        .collect::<Vec<_>>()
        .join(", ")
}
