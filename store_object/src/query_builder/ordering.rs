//! Result ordering

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Single-column ordering, ascending unless stated otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    #[serde(default = "ascending_by_default")]
    pub ascending: bool,
}

fn ascending_by_default() -> bool {
    true
}

impl OrderBy {
    pub fn new(column: &str, ascending: bool) -> Self {
        Self {
            column: column.to_string(),
            ascending,
        }
    }

    pub fn asc(column: &str) -> Self {
        Self::new(column, true)
    }

    pub fn desc(column: &str) -> Self {
        Self::new(column, false)
    }

    pub fn sort_order(&self) -> SortOrder {
        if self.ascending {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}
