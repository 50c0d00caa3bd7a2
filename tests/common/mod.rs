//! Demo order-tracking domain shared by the integration tests: a small
//! schema, baseline seed rows, and a mapped-access context over a shared
//! connection.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use rusqlite::params;
use serde_json::json;

use sqlite_fixture::{FactoryConfig, FixtureResult, SharedConnection, TestDbFactory};

/// A row of the `orders` table, read back field-for-field.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: String,
    pub customer_id: String,
    pub item: String,
    pub quantity: i64,
    pub placed_at: DateTime<Utc>,
    pub metadata: serde_json::Value,
}

/// Mapped access to the demo schema, bound to one shared connection.
pub struct OrdersContext {
    conn: SharedConnection,
}

impl OrdersContext {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &SharedConnection {
        &self.conn
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&rusqlite::Connection) -> rusqlite::Result<T>,
    ) -> FixtureResult<T> {
        let guard = self.conn.lock().expect("connection mutex poisoned");
        Ok(f(&guard)?)
    }

    /// Apply the full demo schema.
    pub fn migrate(&self) -> FixtureResult<()> {
        self.with_conn(|conn| {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS customers (
                    id      TEXT PRIMARY KEY,
                    name    TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS orders (
                    id          TEXT PRIMARY KEY,
                    customer_id TEXT NOT NULL REFERENCES customers(id),
                    item        TEXT NOT NULL,
                    quantity    INTEGER NOT NULL,
                    placed_at   TEXT NOT NULL,
                    metadata    TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer_id);",
            )
        })
    }

    /// Insert the baseline rows every test starts from.
    pub fn seed_baseline(&self) -> FixtureResult<()> {
        self.insert_customer("cust-ada", "Ada")?;
        self.insert_customer("cust-grace", "Grace")?;
        self.insert_order(&OrderRow {
            id: "ord-1".to_string(),
            customer_id: "cust-ada".to_string(),
            item: "widget".to_string(),
            quantity: 3,
            placed_at: fixed_timestamp(),
            metadata: json!({"priority": "normal"}),
        })?;
        self.insert_order(&OrderRow {
            id: "ord-2".to_string(),
            customer_id: "cust-grace".to_string(),
            item: "sprocket".to_string(),
            quantity: 1,
            placed_at: fixed_timestamp(),
            metadata: json!({"priority": "rush", "gift": true}),
        })?;
        Ok(())
    }

    pub fn insert_customer(&self, id: &str, name: &str) -> FixtureResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO customers (id, name) VALUES (?1, ?2)",
                params![id, name],
            )
            .map(|_| ())
        })
    }

    pub fn insert_order(&self, order: &OrderRow) -> FixtureResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO orders (id, customer_id, item, quantity, placed_at, metadata)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    order.id,
                    order.customer_id,
                    order.item,
                    order.quantity,
                    order.placed_at.to_rfc3339(),
                    order.metadata.to_string(),
                ],
            )
            .map(|_| ())
        })
    }

    pub fn get_order(&self, id: &str) -> FixtureResult<Option<OrderRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, customer_id, item, quantity, placed_at, metadata
                 FROM orders WHERE id = ?1",
                params![id],
                |row| {
                    let placed_at: String = row.get(4)?;
                    let metadata: String = row.get(5)?;
                    Ok(OrderRow {
                        id: row.get(0)?,
                        customer_id: row.get(1)?,
                        item: row.get(2)?,
                        quantity: row.get(3)?,
                        placed_at: DateTime::parse_from_rfc3339(&placed_at)
                            .expect("placed_at is rfc3339")
                            .with_timezone(&Utc),
                        metadata: serde_json::from_str(&metadata)
                            .expect("metadata is json"),
                    })
                },
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })
        })
    }

    pub fn customer_count(&self) -> FixtureResult<i64> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))
        })
    }

    pub fn order_count(&self) -> FixtureResult<i64> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))
        })
    }
}

/// Deterministic timestamp so seeded rows compare equal across runs.
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Default in-memory factory over the demo domain.
pub fn orders_factory() -> TestDbFactory<OrdersContext> {
    FactoryConfig::new()
        .context(OrdersContext::new)
        .migrate(|ctx: &OrdersContext| ctx.migrate())
        .seed(|ctx: &OrdersContext| ctx.seed_baseline())
        .build()
        .unwrap()
}
