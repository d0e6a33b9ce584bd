//! Query builder utilities
//!
//! This module provides the select query model shared by the data manager,
//! the cache key derivation and the remote clients.

pub mod builder;
pub mod ordering;
pub mod pagination;
pub mod sql_generation;


pub use builder::{SelectOptions, SelectQuery};
pub use ordering::{OrderBy, SortOrder};
pub use pagination::{Pagination, RowRange};
pub use sql_generation::{SqlGenerator, SqlStatement};
