//! Select query model
//!
//! `SelectOptions` is the part of a read the caller controls and the part
//! the cache key is derived from. It serializes deterministically: equality
//! filters live in a sorted map and empty options are skipped.

use crate::query_builder::ordering::OrderBy;
use crate::query_builder::pagination::{Pagination, RowRange};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Filters, ordering and row limits of a select
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOptions {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub eq: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RowRange>,
}

impl SelectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter; a second filter on the same column replaces the first
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.eq.insert(column.to_string(), value.into());
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some(OrderBy::new(column, ascending));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Restrict to rows `from..=to` (zero-based)
    pub fn range(mut self, from: u32, to: u32) -> Self {
        self.range = Some(RowRange::new(from, to));
        self
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::resolve(self.limit, self.range)
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A complete read request handed to a remote client
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub table: String,
    pub projection: String,
    pub options: SelectOptions,
}

impl SelectQuery {
    pub fn new(table: &str, projection: &str) -> Self {
        Self {
            table: table.to_string(),
            projection: projection.to_string(),
            options: SelectOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SelectOptions) -> Self {
        self.options = options;
        self
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.options = self.options.eq(column, value);
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.options = self.options.order(column, ascending);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.options = self.options.limit(limit);
        self
    }

    pub fn range(mut self, from: u32, to: u32) -> Self {
        self.options = self.options.range(from, to);
        self
    }
}
