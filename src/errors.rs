//! Error types for the LigaHaus crate
//!
//! This module contains all error types that can be returned while setting up
//! or using a `LigaHaus` instance.

use store_object::DataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LigaHausError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error(transparent)]
    Data(#[from] DataError),
}
