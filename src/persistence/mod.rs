//! Persistence Layer
//!
//! SQLite storage for price alerts with async operations via sqlx.
//!
//! # Database Schema
//!
//! ## Price Requests Table
//! - id: Autoincrementing integer
//! - product_id: Product identifier, "UNKNOWN" when the page carried none
//! - product_title: Optional product title
//! - product_url: Optional product URL
//! - email: Shopper address to notify
//! - desired_price: DECIMAL(10,2), quantized before it gets here
//! - requested_at: UTC timestamp, captured at write time
//!
//! Provisioning runs on every start and is idempotent; existing rows are
//! never touched.

pub mod models;
pub mod repository;
pub mod schema;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Database connection pool
pub type DbPool = SqlitePool;

/// Startup failure: the store could not be reached or provisioned.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Schema provisioning error: {0}")]
    Provisioning(String),
}

/// Runtime failure while reading or writing alerts.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Insert error: {0}")]
    Insert(String),

    #[error("Query error: {0}")]
    Query(String),
}

/// Initialize the alert store.
///
/// # Arguments
/// - `database_url`: SQLite URL (e.g., "sqlite://price_requests.db")
/// - `max_connections`: Pool size
///
/// # Errors
/// Returns an error if the connection fails or schema provisioning fails.
/// Callers treat this as fatal; nothing can be recorded without the schema.
pub async fn init_store(
    database_url: &str,
    max_connections: u32,
) -> Result<DbPool, ConfigurationError> {
    info!("Initializing alert store: {}", database_url);

    // Ensure the data directory exists
    if let Some(db_path) = database_url.strip_prefix("sqlite://") {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConfigurationError::Connection(sqlx::Error::Configuration(Box::new(e)))
                })?;
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .log_statements(tracing::log::LevelFilter::Debug);

    // Hosting platforms recycle idle links; validate before handing out.
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .test_before_acquire(true)
        .connect_with(options)
        .await?;

    provision_schema(&pool).await?;

    info!("✓ Alert store ready");

    Ok(pool)
}

/// Create the `price_requests` table if it does not exist yet.
pub async fn provision_schema(pool: &DbPool) -> Result<(), ConfigurationError> {
    sqlx::query(schema::CREATE_PRICE_REQUESTS_SQL.as_str())
        .execute(pool)
        .await
        .map_err(|e| {
            ConfigurationError::Provisioning(format!(
                "Failed to create {} table: {}",
                schema::PRICE_REQUESTS.name,
                e
            ))
        })?;

    Ok(())
}
