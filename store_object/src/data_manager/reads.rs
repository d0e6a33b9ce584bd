use super::core::DataManager;
use crate::errors::DataResult;
use crate::query_builder::{SelectOptions, SelectQuery};
use crate::tables;
use crate::validation::ValidatedTableName;
use cache_system::CacheKey;
use serde_json::Value;
use std::sync::Arc;

/// Rows of a select and whether they came from the cache
#[derive(Debug, Clone, PartialEq)]
pub struct SelectResult {
    pub data: Vec<Value>,
    pub from_cache: bool,
}

impl DataManager {
    /// Read rows from `table`
    ///
    /// A fresh cached result is returned without touching the remote client.
    /// On a miss, concurrent identical selects share one remote call, which
    /// runs with retries and stores its result with the default TTL. A result
    /// whose table was written while the call was pending is returned but not
    /// cached.
    pub async fn select(
        &self,
        table: &str,
        projection: &str,
        options: SelectOptions,
    ) -> DataResult<SelectResult> {
        ValidatedTableName::new(table)?;
        let key = CacheKey::query(table, projection, &options)?;

        if let Some(data) = self.cache.get(&key) {
            tracing::debug!(key = %key, "cache hit");
            return Ok(SelectResult {
                data,
                from_cache: true,
            });
        }
        tracing::debug!(key = %key, "cache miss");

        let query = SelectQuery::new(table, projection).with_options(options);
        let client = Arc::clone(&self.client);
        let cache = Arc::clone(&self.cache);
        let retry = self.retry.clone();
        let cache_key = key.clone();

        let data = self
            .in_flight
            .get_or_create(&key, move || {
                let generation = cache.generation();
                async move {
                    let data = retry
                        .run(client.is_available(), || client.select(&query))
                        .await?;
                    cache.set_default_since(cache_key, data.clone(), generation);
                    Ok(data)
                }
            })
            .await?;

        Ok(SelectResult {
            data,
            from_cache: false,
        })
    }

    /// Probe the remote store with a one-row read of `matches`
    ///
    /// Bypasses cache and retries. Never fails; problems are logged and
    /// reported as `false`.
    pub async fn health_check(&self) -> bool {
        if !self.client.is_available() {
            tracing::warn!("health check skipped: no database connection");
            return false;
        }

        let probe = SelectQuery::new(tables::MATCHES, "id").limit(1);
        match self.client.select(&probe).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(kind = ?e.kind, "health check failed: {}", e);
                false
            }
        }
    }

    pub async fn get_matches(&self) -> DataResult<Vec<Value>> {
        self.rows(tables::MATCHES, SelectOptions::new().order("date", false))
            .await
    }

    pub async fn get_players(&self) -> DataResult<Vec<Value>> {
        self.rows(tables::PLAYERS, SelectOptions::new().order("name", true))
            .await
    }

    pub async fn get_players_by_team(&self, team: &str) -> DataResult<Vec<Value>> {
        self.rows(
            tables::PLAYERS,
            SelectOptions::new().eq("team", team).order("name", true),
        )
        .await
    }

    pub async fn get_bans(&self) -> DataResult<Vec<Value>> {
        self.rows(tables::BANS, SelectOptions::new()).await
    }

    pub async fn get_transactions(&self) -> DataResult<Vec<Value>> {
        self.rows(
            tables::TRANSACTIONS,
            SelectOptions::new().order("date", false),
        )
        .await
    }

    pub async fn get_finances(&self) -> DataResult<Vec<Value>> {
        self.rows(tables::FINANCES, SelectOptions::new()).await
    }

    pub async fn get_managers(&self) -> DataResult<Vec<Value>> {
        self.rows(tables::MANAGERS, SelectOptions::new()).await
    }

    pub async fn get_player_of_the_match_awards(&self) -> DataResult<Vec<Value>> {
        self.rows(tables::PLAYER_OF_THE_MATCH, SelectOptions::new())
            .await
    }

    async fn rows(&self, table: &str, options: SelectOptions) -> DataResult<Vec<Value>> {
        Ok(self.select(table, "*", options).await?.data)
    }
}
