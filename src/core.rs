//! Core LigaHaus functionality
//!
//! This module contains the main LigaHaus struct, which turns an `AppConfig`
//! into a connection pool and a ready `DataManager` sharing one signal manager.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use store_object::{DataManager, DataManagerConfig, PgRemoteClient};
use signal_system::SignalManager;

use crate::errors::LigaHausError;
use config::AppConfig;

/// Main LigaHaus coordinator that owns the database pool and the data manager
pub struct LigaHaus {
    pool: PgPool,
    data: Arc<DataManager>,
    signals: Arc<SignalManager>,
}

impl std::fmt::Debug for LigaHaus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LigaHaus")
            .field("pool_size", &self.pool.size())
            .field("data", &self.data)
            .finish()
    }
}

impl LigaHaus {
    /// Validate `config`, connect to the database and build the data manager
    pub async fn new(config: AppConfig) -> Result<Self, LigaHausError> {
        config.validate()?;
        let database = &config.database;
        let connection_string = database.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(database.max_connections)
            .min_connections(database.min_connections)
            .acquire_timeout(Duration::from_secs(database.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(database.idle_timeout_seconds));

        // Set max lifetime if specified
        if database.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(database.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        crate::debug_log!(
            host = %database.host,
            database = %database.database,
            "connected to database"
        );

        Ok(Self::from_pool(pool, &config))
    }

    /// Load configuration from the environment and connect
    pub async fn from_env() -> Result<Self, LigaHausError> {
        Self::new(AppConfig::load()?).await
    }

    /// Build on an existing pool; cache and retry settings come from `config`
    pub fn from_pool(pool: PgPool, config: &AppConfig) -> Self {
        let signals = Arc::new(SignalManager::new());
        let client = Arc::new(PgRemoteClient::new(pool.clone()));
        let data = DataManager::new(client, DataManagerConfig::from_app_config(config))
            .with_signal_manager(Arc::clone(&signals));

        Self {
            pool,
            data: Arc::new(data),
            signals,
        }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Shared data manager, cheap to clone into UI components
    pub fn data(&self) -> &Arc<DataManager> {
        &self.data
    }

    /// Signal manager receiving an event for every successful write
    pub fn signals(&self) -> &Arc<SignalManager> {
        &self.signals
    }

    /// Check database connection health
    pub async fn health_check(&self) -> bool {
        self.data.health_check().await
    }

    /// Close the pool; later data manager calls fail with `NoConnection`
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{CacheConfig, DatabaseConfig, RetryConfig};
    use store_object::{DataError, SelectOptions};

    fn app_config() -> AppConfig {
        AppConfig {
            database: DatabaseConfig::new(
                "localhost".to_string(),
                5432,
                "liga".to_string(),
                "postgres".to_string(),
                "password".to_string(),
                1,
                5,
                1,
                600,
                3600,
            ),
            cache: CacheConfig::new(5_000),
            retry: RetryConfig::new(2, 100, 400),
        }
    }

    fn lazy_pool() -> PgPool {
        sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&app_config().database.connection_string())
            .unwrap()
    }

    #[tokio::test]
    async fn test_from_pool_wires_signals() {
        let liga = LigaHaus::from_pool(lazy_pool(), &app_config());
        assert!(liga.data().has_signals());
        assert!(liga.data().is_available());
        assert_eq!(liga.signals().callback_count(), 0);
    }

    #[tokio::test]
    async fn test_closed_pool_reports_no_connection() {
        let liga = LigaHaus::from_pool(lazy_pool(), &app_config());
        liga.close().await;

        assert!(!liga.data().is_available());
        assert!(!liga.health_check().await);

        let err = liga
            .data()
            .select("players", "*", SelectOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err, DataError::NoConnection);
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected_before_connecting() {
        let mut config = app_config();
        config.retry.max_retries = 0;

        let err = LigaHaus::new(config).await.unwrap_err();
        assert!(matches!(err, LigaHausError::Config(_)));
    }
}
