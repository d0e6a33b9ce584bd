//! Field rules
//!
//! A `Validator` holds one `TableRules` per table. Rules are configuration:
//! they are built once and never change, and `validate` is a pure function of
//! the rules and the record.

use crate::remote::Record;
use serde_json::Value;
use std::collections::HashMap;

/// Expected JSON type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

/// Constraints for a single field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub required: bool,
    pub kind: FieldKind,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub allowed: Option<Vec<Value>>,
}

impl FieldRule {
    fn of_kind(kind: FieldKind) -> Self {
        Self {
            required: false,
            kind,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            allowed: None,
        }
    }

    pub fn text() -> Self {
        Self::of_kind(FieldKind::Text)
    }

    pub fn number() -> Self {
        Self::of_kind(FieldKind::Number)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Restrict the field to a fixed set of values
    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Check one value against this rule, appending messages to `errors`
    fn check(&self, field: &str, value: Option<&Value>, errors: &mut Vec<String>) {
        let value = match value {
            Some(v) if !is_empty(v) => v,
            _ => {
                if self.required {
                    errors.push(format!("{} ist erforderlich", field));
                }
                return;
            }
        };

        match self.kind {
            FieldKind::Text => {
                let Some(text) = value.as_str() else {
                    errors.push(format!("{} muss ein Text sein", field));
                    return;
                };
                let length = text.chars().count();
                if let Some(min_length) = self.min_length {
                    if length < min_length {
                        errors.push(format!(
                            "{} muss mindestens {} Zeichen lang sein",
                            field, min_length
                        ));
                    }
                }
                if let Some(max_length) = self.max_length {
                    if length > max_length {
                        errors.push(format!(
                            "{} darf maximal {} Zeichen lang sein",
                            field, max_length
                        ));
                    }
                }
            }
            FieldKind::Number => {
                let Some(number) = value.as_f64().filter(|n| n.is_finite()) else {
                    errors.push(format!("{} muss eine Zahl sein", field));
                    return;
                };
                if let Some(min) = self.min {
                    if number < min {
                        errors.push(format!("{} muss mindestens {} sein", field, min));
                    }
                }
                if let Some(max) = self.max {
                    if number > max {
                        errors.push(format!("{} darf maximal {} sein", field, max));
                    }
                }
            }
        }

        if let Some(allowed) = &self.allowed {
            if !allowed.iter().any(|candidate| same_value(candidate, value)) {
                let listed = allowed.iter().map(display_value).collect::<Vec<_>>();
                errors.push(format!(
                    "{} muss einer der folgenden Werte sein: {}",
                    field,
                    listed.join(", ")
                ));
            }
        }
    }
}

/// Missing, null and empty string are all treated as "no value"
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Numbers compare by value, so `1` and `1.0` are the same
fn same_value(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) if a.is_number() && b.is_number() => x == y,
        _ => a == b,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Ordered field rules for one table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRules {
    fields: Vec<(String, FieldRule)>,
}

impl TableRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, rule: FieldRule) -> Self {
        self.fields.push((name.to_string(), rule));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rule)| rule)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }
}

/// Outcome of validating one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Per-table record validator
#[derive(Debug, Clone, Default)]
pub struct Validator {
    tables: HashMap<String, TableRules>,
}

impl Validator {
    /// A validator without any rules; every record passes
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: &str, rules: TableRules) -> Self {
        self.tables.insert(table.to_string(), rules);
        self
    }

    pub fn rules_for(&self, table: &str) -> Option<&TableRules> {
        self.tables.get(table)
    }

    /// Validate `record` against the rules registered for `table`
    ///
    /// Tables without rules always validate. All violations are collected,
    /// in the order the fields were declared.
    pub fn validate(&self, table: &str, record: &Record) -> ValidationResult {
        let Some(rules) = self.tables.get(table) else {
            return ValidationResult::from_errors(Vec::new());
        };

        let mut errors = Vec::new();
        for (field, rule) in rules.fields() {
            rule.check(field, record.get(field), &mut errors);
        }
        ValidationResult::from_errors(errors)
    }
}
