//! Validation module
//!
//! Two kinds of checks live here: SQL identifier validation used before a
//! table or column name is written into a statement, and per-table field
//! rules applied to records before they are sent to the database.

pub mod defaults;
pub mod identifiers;
pub mod rules;

pub use identifiers::{ValidatedFieldName, ValidatedTableName, ValidationError};
pub use rules::{FieldKind, FieldRule, TableRules, ValidationResult, Validator};
