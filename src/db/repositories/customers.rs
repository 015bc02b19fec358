use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::db::{connection::Database, helpers::parse_datetime, models::Customer};

fn row_to_customer(row: &Row) -> Result<Customer> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Customer {
        customer_id: row.get("customer_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        subscription_id: row.get("subscription_id")?,
        location: row.get("location")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    pub async fn insert_customer(
        &self,
        name: &str,
        email: &str,
        subscription_id: Option<i64>,
        location: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let name = name.to_string();
        let email = email.to_string();
        let location = location.map(str::to_string);
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO customers (name, email, subscription_id, location, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    name,
                    email,
                    subscription_id,
                    location,
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert customer")?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    pub async fn get_customers(&self) -> Result<Vec<Customer>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT customer_id, name, email, subscription_id, location, created_at, updated_at
                 FROM customers
                 ORDER BY customer_id ASC",
            )?;

            let mut rows = stmt.query([])?;
            let mut customers = Vec::new();
            while let Some(row) = rows.next()? {
                customers.push(row_to_customer(row)?);
            }

            Ok(customers)
        })
        .await
    }

    /// Subscription price per customer, joined through the customer's plan.
    /// Customers without a subscription are absent from the map.
    pub async fn get_customer_prices(&self) -> Result<HashMap<i64, i64>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT customers.customer_id, subscriptions.price
                 FROM customers
                 JOIN subscriptions
                   ON subscriptions.subscription_id = customers.subscription_id",
            )?;

            let mut rows = stmt.query([])?;
            let mut prices = HashMap::new();
            while let Some(row) = rows.next()? {
                let customer_id: i64 = row.get(0)?;
                let price: i64 = row.get(1)?;
                prices.insert(customer_id, price);
            }

            Ok(prices)
        })
        .await
    }
}
