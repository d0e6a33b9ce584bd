//! Cache key derivation
//!
//! A query key is built from the table name, the projection and the
//! serialized query options. The same key is used by the result store and
//! by the in-flight tracker, so the two can never disagree about which
//! requests are identical.

use crate::errors::CacheError;
use serde::Serialize;

/// Builder for deterministic query cache keys
pub struct CacheKey;

impl CacheKey {
    /// Build the key for a select on `table`
    ///
    /// `options` must serialize deterministically (sorted maps, fixed field order);
    /// the table name is kept verbatim at the start of the key so table-wide
    /// invalidation can match it as a substring.
    pub fn query<O: Serialize + ?Sized>(
        table: &str,
        projection: &str,
        options: &O,
    ) -> Result<String, CacheError> {
        if table.is_empty() {
            return Err(CacheError::InvalidKey("table name cannot be empty".into()));
        }

        let options = serde_json::to_string(options)?;
        Ok(format!("{}:{}:{}", table, projection, options))
    }
}
