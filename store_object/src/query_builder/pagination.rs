//! Row limits
//!
//! A select can carry a plain `limit`, an inclusive `range`, or both. The
//! range fixes the offset and the window size; a limit further caps it.

use serde::{Deserialize, Serialize};

/// Inclusive, zero-based row window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub from: u32,
    pub to: u32,
}

impl RowRange {
    pub fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }

    /// Number of rows covered; an inverted range covers none
    pub fn len(&self) -> u32 {
        if self.to < self.from {
            0
        } else {
            self.to - self.from + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pagination configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine a limit and a range into LIMIT/OFFSET values
    pub fn resolve(limit: Option<u32>, range: Option<RowRange>) -> Self {
        match range {
            Some(range) => {
                let window = range.len();
                Self {
                    limit: Some(limit.map_or(window, |limit| limit.min(window))),
                    offset: Some(range.from),
                }
            }
            None => Self {
                limit,
                offset: None,
            },
        }
    }

    pub fn to_sql(&self) -> String {
        let mut clauses = Vec::new();

        if let Some(limit) = self.limit {
            clauses.push(format!("LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            clauses.push(format!("OFFSET {}", offset));
        }

        clauses.join(" ")
    }
}
