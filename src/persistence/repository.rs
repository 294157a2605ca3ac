//! Alert Repository
//!
//! Data access layer for recorded price alerts.

use chrono::Utc;
use tracing::{debug, error};

use super::models::{NewPriceAlert, PriceAlertRecord};
use super::schema::{INSERT_PRICE_REQUEST_SQL, PRICE_REQUESTS};
use super::{DbPool, PersistenceError};

/// Price alert repository. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct AlertRepository {
    pool: DbPool,
}

impl AlertRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert one alert inside its own transaction.
    ///
    /// `requested_at` is captured here, at write time. Concurrent inserts
    /// never interleave within a row; each call commits or rolls back alone.
    pub async fn insert(&self, alert: NewPriceAlert) -> Result<PriceAlertRecord, PersistenceError> {
        let requested_at = Utc::now();

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to open alert transaction: {}", e);
            PersistenceError::Insert(format!("Failed to open transaction: {}", e))
        })?;

        let id = sqlx::query_scalar::<_, i64>(INSERT_PRICE_REQUEST_SQL.as_str())
            .bind(&alert.product_id)
            .bind(&alert.product_title)
            .bind(&alert.product_url)
            .bind(&alert.email)
            .bind(alert.desired_price.to_f64())
            .bind(requested_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to insert alert: {}", e);
                PersistenceError::Insert(format!("Failed to insert alert: {}", e))
            })?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit alert {}: {}", id, e);
            PersistenceError::Insert(format!("Failed to commit alert: {}", e))
        })?;

        debug!("Recorded alert {} for product {}", id, alert.product_id);

        Ok(PriceAlertRecord {
            id,
            product_id: alert.product_id,
            product_title: alert.product_title,
            product_url: alert.product_url,
            email: alert.email,
            desired_price: alert.desired_price.to_f64(),
            requested_at,
        })
    }

    /// Count all recorded alerts.
    pub async fn count(&self) -> Result<i64, PersistenceError> {
        let sql = format!("SELECT COUNT(*) FROM {}", PRICE_REQUESTS.name);
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to count alerts: {}", e);
                PersistenceError::Query(format!("Failed to count alerts: {}", e))
            })
    }

    /// Most recent alerts, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<PriceAlertRecord>, PersistenceError> {
        // SQLite stores whole DECIMAL values with INTEGER representation;
        // the CAST keeps the decoded column type stable.
        let sql = format!(
            "SELECT id, product_id, product_title, product_url, email, \
             CAST(desired_price AS REAL) AS desired_price, requested_at \
             FROM {} ORDER BY id DESC LIMIT ?1",
            PRICE_REQUESTS.name
        );
        sqlx::query_as::<_, PriceAlertRecord>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list alerts: {}", e);
                PersistenceError::Query(format!("Failed to list alerts: {}", e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::{DesiredPrice, PriceInput};
    use crate::persistence::init_store;

    fn sample_alert(email: &str, price: &str) -> NewPriceAlert {
        NewPriceAlert {
            product_id: "sku-1".to_string(),
            product_title: "Cafetera".to_string(),
            product_url: "https://shop.example/p/1".to_string(),
            email: email.to_string(),
            desired_price: DesiredPrice::parse(PriceInput::from(price)).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_returns_assigned_id_and_fields() {
        let pool = init_store("sqlite::memory:", 5).await.unwrap();
        let repo = AlertRepository::new(pool);

        let record = repo
            .insert(sample_alert("ana@example.com", "19.99"))
            .await
            .unwrap();

        assert!(record.id > 0);
        assert_eq!(record.product_id, "sku-1");
        assert_eq!(record.product_title, "Cafetera");
        assert_eq!(record.email, "ana@example.com");
        assert_eq!(record.desired_price, 19.99);
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let pool = init_store("sqlite::memory:", 5).await.unwrap();
        let repo = AlertRepository::new(pool);

        let first = repo
            .insert(sample_alert("ana@example.com", "10"))
            .await
            .unwrap();
        let second = repo
            .insert(sample_alert("ana@example.com", "10"))
            .await
            .unwrap();

        assert!(second.id > first.id);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_recent_round_trips_stored_values() {
        let pool = init_store("sqlite::memory:", 5).await.unwrap();
        let repo = AlertRepository::new(pool);

        let inserted = repo
            .insert(sample_alert("ana@example.com", "12.5"))
            .await
            .unwrap();

        let rows = repo.recent(10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, inserted.id);
        assert_eq!(rows[0].product_url, "https://shop.example/p/1");
        assert_eq!(rows[0].desired_price, 12.5);
        assert_eq!(rows[0].requested_at, inserted.requested_at);
    }

    #[tokio::test]
    async fn test_recent_decodes_whole_prices() {
        // A whole amount lands in SQLite with INTEGER representation under
        // the column's NUMERIC affinity; the read must still decode.
        let pool = init_store("sqlite::memory:", 5).await.unwrap();
        let repo = AlertRepository::new(pool);

        repo.insert(sample_alert("ana@example.com", "25"))
            .await
            .unwrap();

        let rows = repo.recent(10).await.unwrap();
        assert_eq!(rows[0].desired_price, 25.0);
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first() {
        let pool = init_store("sqlite::memory:", 5).await.unwrap();
        let repo = AlertRepository::new(pool);

        let first = repo
            .insert(sample_alert("first@example.com", "1"))
            .await
            .unwrap();
        let second = repo
            .insert(sample_alert("second@example.com", "2"))
            .await
            .unwrap();

        let rows = repo.recent(10).await.unwrap();
        assert_eq!(rows[0].id, second.id);
        assert_eq!(rows[1].id, first.id);
    }

    #[tokio::test]
    async fn test_insert_fails_cleanly_without_table() {
        let pool = init_store("sqlite::memory:", 5).await.unwrap();
        sqlx::query("DROP TABLE price_requests")
            .execute(&pool)
            .await
            .unwrap();
        let repo = AlertRepository::new(pool);

        let result = repo.insert(sample_alert("ana@example.com", "5")).await;
        assert!(matches!(result, Err(PersistenceError::Insert(_))));
    }
}
