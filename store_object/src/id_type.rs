//! Id Type module
//!
//! This module provides the record id used by update and delete.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display};

/// Primary key of a row, numeric or text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(i64),
    Text(String),
}

impl RecordId {
    /// A text id with no visible characters counts as absent
    pub fn is_blank(&self) -> bool {
        match self {
            RecordId::Numeric(_) => false,
            RecordId::Text(s) => s.trim().is_empty(),
        }
    }

    /// Read an id out of a JSON value (a row's `id` field, say)
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecordId::Numeric),
            Value::String(s) if !s.trim().is_empty() => Some(RecordId::Text(s.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Numeric(n) => Value::from(*n),
            RecordId::Text(s) => Value::String(s.clone()),
        }
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Numeric(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        RecordId::Numeric(id as i64)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Numeric(id)
    }
}

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        RecordId::Numeric(id as i64)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Text(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_ids() {
        assert!(RecordId::from("").is_blank());
        assert!(RecordId::from("  ").is_blank());
        assert!(!RecordId::from("a1").is_blank());
        assert!(!RecordId::from(0).is_blank());
    }

    #[test]
    fn test_from_value() {
        assert_eq!(RecordId::from_value(&json!(12)), Some(RecordId::Numeric(12)));
        assert_eq!(
            RecordId::from_value(&json!("x-1")),
            Some(RecordId::Text("x-1".into()))
        );
        assert_eq!(RecordId::from_value(&json!(null)), None);
        assert_eq!(RecordId::from_value(&json!("")), None);
        assert_eq!(RecordId::from_value(&json!(1.5)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(RecordId::from(42).to_string(), "42");
        assert_eq!(RecordId::from("abc").to_string(), "abc");
    }
}
