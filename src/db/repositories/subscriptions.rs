use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{connection::Database, models::Subscription};

fn row_to_subscription(row: &Row) -> Result<Subscription, rusqlite::Error> {
    Ok(Subscription {
        subscription_id: row.get("subscription_id")?,
        subscription_name: row.get("subscription_name")?,
        price: row.get("price")?,
    })
}

impl Database {
    pub async fn insert_subscription(&self, name: &str, price: i64) -> Result<i64> {
        let name = name.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO subscriptions (subscription_name, price) VALUES (?1, ?2)",
                params![name, price],
            )
            .with_context(|| "failed to insert subscription")?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    pub async fn get_subscription(&self, subscription_id: i64) -> Result<Option<Subscription>> {
        self.execute(move |conn| {
            conn.query_row(
                "SELECT subscription_id, subscription_name, price
                 FROM subscriptions
                 WHERE subscription_id = ?1",
                params![subscription_id],
                row_to_subscription,
            )
            .optional()
            .with_context(|| "failed to load subscription")
        })
        .await
    }

    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT subscription_id, subscription_name, price
                 FROM subscriptions
                 ORDER BY subscription_id ASC",
            )?;

            let rows = stmt.query_map([], row_to_subscription)?;
            let mut subscriptions = Vec::new();
            for subscription in rows {
                subscriptions.push(subscription?);
            }

            Ok(subscriptions)
        })
        .await
    }
}
