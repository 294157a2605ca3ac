//! Database Models
//!
//! Persistent data structures for recorded price alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::domain::price::DesiredPrice;

/// Alert record in the `price_requests` table.
///
/// `product_title` and `product_url` are nullable in the schema but always
/// written as strings by the recorder, possibly empty.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PriceAlertRecord {
    pub id: i64,
    pub product_id: String,
    pub product_title: String,
    pub product_url: String,
    pub email: String,
    pub desired_price: f64,
    pub requested_at: DateTime<Utc>,
}

/// Create alert input. `id` and `requested_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPriceAlert {
    pub product_id: String,
    pub product_title: String,
    pub product_url: String,
    pub email: String,
    pub desired_price: DesiredPrice,
}
