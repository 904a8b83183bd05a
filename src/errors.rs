use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("Failed to connect to {host}:{port} (db={database}): {source}")]
    Connection {
        host: String,
        port: u16,
        database: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("Failed to ensure schema on {target}: {source}")]
    Schema {
        target: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Cycle [{cycle}] failed during {operation} on {target}: {source}")]
    Insert {
        cycle: u64,
        operation: &'static str,
        target: String,
        #[source]
        source: sqlx::Error,
    },
}
