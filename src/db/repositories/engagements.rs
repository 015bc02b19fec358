use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, parse_like_status},
    models::{Engagement, LikeStatus},
};

fn row_to_engagement(row: &Row) -> Result<Engagement> {
    let session_date: String = row.get("session_date")?;
    let like_status: String = row.get("like_status")?;

    Ok(Engagement {
        engagement_id: row.get("engagement_id")?,
        customer_id: row.get("customer_id")?,
        movie_id: row.get("movie_id")?,
        session_date: parse_datetime(&session_date, "session_date")?,
        session_duration: row.get("session_duration")?,
        watched_fully: row.get("watched_fully")?,
        like_status: parse_like_status(&like_status)?,
    })
}

impl Database {
    pub async fn insert_engagement(
        &self,
        customer_id: i64,
        movie_id: Option<i64>,
        session_date: DateTime<Utc>,
        session_duration: i64,
        watched_fully: bool,
        like_status: LikeStatus,
    ) -> Result<i64> {
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO engagements (customer_id, movie_id, session_date, session_duration, watched_fully, like_status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    customer_id,
                    movie_id,
                    session_date.to_rfc3339(),
                    session_duration,
                    watched_fully,
                    like_status.as_str(),
                ],
            )
            .with_context(|| "failed to insert engagement")?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    pub async fn get_engagements(&self) -> Result<Vec<Engagement>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT engagement_id, customer_id, movie_id, session_date, session_duration, watched_fully, like_status
                 FROM engagements
                 ORDER BY customer_id ASC, session_date ASC",
            )?;

            let mut rows = stmt.query([])?;
            let mut engagements = Vec::new();
            while let Some(row) = rows.next()? {
                engagements.push(row_to_engagement(row)?);
            }

            Ok(engagements)
        })
        .await
    }

    pub async fn get_engagements_for_customer(&self, customer_id: i64) -> Result<Vec<Engagement>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT engagement_id, customer_id, movie_id, session_date, session_duration, watched_fully, like_status
                 FROM engagements
                 WHERE customer_id = ?1
                 ORDER BY session_date ASC",
            )?;

            let mut rows = stmt.query(params![customer_id])?;
            let mut engagements = Vec::new();
            while let Some(row) = rows.next()? {
                engagements.push(row_to_engagement(row)?);
            }

            Ok(engagements)
        })
        .await
    }
}
