//! Alert Table Schema
//!
//! The `price_requests` table is described once as data. Both the
//! provisioning DDL and the insert statement are rendered from that single
//! definition, so column order cannot drift between the two.

use once_cell::sync::Lazy;

/// Logical column type, rendered to SQLite-flavoured SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Auto-incrementing integer primary key, assigned by the store.
    PrimaryKey,
    Text,
    /// Fixed-point amount, e.g. DECIMAL(10,2) for prices.
    Decimal { precision: u8, scale: u8 },
    Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

/// One row per "notify me when the price drops" request.
pub const PRICE_REQUESTS: TableDef = TableDef {
    name: "price_requests",
    columns: &[
        ColumnDef {
            name: "id",
            kind: ColumnKind::PrimaryKey,
            nullable: false,
        },
        ColumnDef {
            name: "product_id",
            kind: ColumnKind::Text,
            nullable: false,
        },
        ColumnDef {
            name: "product_title",
            kind: ColumnKind::Text,
            nullable: true,
        },
        ColumnDef {
            name: "product_url",
            kind: ColumnKind::Text,
            nullable: true,
        },
        ColumnDef {
            name: "email",
            kind: ColumnKind::Text,
            nullable: false,
        },
        ColumnDef {
            name: "desired_price",
            kind: ColumnKind::Decimal {
                precision: 10,
                scale: 2,
            },
            nullable: false,
        },
        ColumnDef {
            name: "requested_at",
            kind: ColumnKind::Timestamp,
            nullable: false,
        },
    ],
};

pub static CREATE_PRICE_REQUESTS_SQL: Lazy<String> = Lazy::new(|| PRICE_REQUESTS.create_sql());
pub static INSERT_PRICE_REQUEST_SQL: Lazy<String> = Lazy::new(|| PRICE_REQUESTS.insert_sql());

impl ColumnKind {
    fn sql_type(&self) -> String {
        match self {
            ColumnKind::PrimaryKey => "INTEGER PRIMARY KEY AUTOINCREMENT".to_string(),
            ColumnKind::Text => "TEXT".to_string(),
            ColumnKind::Decimal { precision, scale } => {
                format!("DECIMAL({},{})", precision, scale)
            }
            ColumnKind::Timestamp => "TIMESTAMP".to_string(),
        }
    }
}

impl TableDef {
    /// Columns supplied by callers, i.e. everything except the primary key.
    pub fn value_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns
            .iter()
            .filter(|c| c.kind != ColumnKind::PrimaryKey)
    }

    /// Idempotent DDL: `CREATE TABLE IF NOT EXISTS ...`.
    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let mut rendered = format!("{} {}", c.name, c.kind.sql_type());
                if !c.nullable && c.kind != ColumnKind::PrimaryKey {
                    rendered.push_str(" NOT NULL");
                }
                rendered
            })
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            columns.join(", ")
        )
    }

    /// Positional insert over the value columns, returning the new row id.
    pub fn insert_sql(&self) -> String {
        let names: Vec<&str> = self.value_columns().map(|c| c.name).collect();
        let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            self.name,
            names.join(", "),
            placeholders.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sql_renders_full_table() {
        assert_eq!(
            PRICE_REQUESTS.create_sql(),
            "CREATE TABLE IF NOT EXISTS price_requests (\
             id INTEGER PRIMARY KEY AUTOINCREMENT, \
             product_id TEXT NOT NULL, \
             product_title TEXT, \
             product_url TEXT, \
             email TEXT NOT NULL, \
             desired_price DECIMAL(10,2) NOT NULL, \
             requested_at TIMESTAMP NOT NULL)"
        );
    }

    #[test]
    fn test_insert_sql_skips_primary_key() {
        assert_eq!(
            PRICE_REQUESTS.insert_sql(),
            "INSERT INTO price_requests (product_id, product_title, product_url, \
             email, desired_price, requested_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id"
        );
    }

    #[test]
    fn test_value_columns_exclude_id() {
        let names: Vec<&str> = PRICE_REQUESTS.value_columns().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "product_id",
                "product_title",
                "product_url",
                "email",
                "desired_price",
                "requested_at"
            ]
        );
    }

    #[tokio::test]
    async fn test_create_sql_is_valid_and_idempotent() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(CREATE_PRICE_REQUESTS_SQL.as_str())
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(CREATE_PRICE_REQUESTS_SQL.as_str())
            .execute(&pool)
            .await
            .unwrap();

        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='price_requests'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count.0, 1);
    }
}
