use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    models::{CustomerSegment, Segment},
};

fn row_to_segment(row: &Row) -> Result<Segment, rusqlite::Error> {
    Ok(Segment {
        segment_id: row.get("segment_id")?,
        segment_name: row.get("segment_name")?,
        segment_description: row.get("segment_description")?,
    })
}

fn row_to_customer_segment(row: &Row) -> Result<CustomerSegment, rusqlite::Error> {
    Ok(CustomerSegment {
        customer_segment_id: row.get("customer_segment_id")?,
        customer_id: row.get("customer_id")?,
        segment_id: row.get("segment_id")?,
    })
}

impl Database {
    pub async fn list_segments(&self) -> Result<Vec<Segment>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT segment_id, segment_name, segment_description
                 FROM segments
                 ORDER BY segment_id ASC",
            )?;

            let rows = stmt.query_map([], row_to_segment)?;
            let mut segments = Vec::new();
            for segment in rows {
                segments.push(segment?);
            }

            Ok(segments)
        })
        .await
    }

    pub async fn get_customer_segments(&self) -> Result<Vec<CustomerSegment>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT customer_segment_id, customer_id, segment_id
                 FROM customer_segments
                 ORDER BY customer_segment_id ASC",
            )?;

            let rows = stmt.query_map([], row_to_customer_segment)?;
            let mut assignments = Vec::new();
            for assignment in rows {
                assignments.push(assignment?);
            }

            Ok(assignments)
        })
        .await
    }

    /// Replace the segment assignments for the given customers in one
    /// transaction: existing rows for those customer ids are deleted, then
    /// the new set is inserted with sequential surrogate keys 1..N. Either
    /// the whole replacement lands or none of it does.
    pub async fn replace_customer_segments(
        &self,
        assignments: Vec<(i64, i64)>,
    ) -> Result<()> {
        self.execute(move |conn| {
            let tx = conn
                .transaction()
                .with_context(|| "failed to open segment replacement transaction")?;

            {
                let mut delete = tx.prepare(
                    "DELETE FROM customer_segments WHERE customer_id = ?1",
                )?;
                for (customer_id, _) in &assignments {
                    delete.execute(params![customer_id])?;
                }

                let mut insert = tx.prepare(
                    "INSERT INTO customer_segments (customer_segment_id, customer_id, segment_id)
                     VALUES (?1, ?2, ?3)",
                )?;
                for (index, (customer_id, segment_id)) in assignments.iter().enumerate() {
                    let surrogate_id = index as i64 + 1;
                    insert.execute(params![surrogate_id, customer_id, segment_id])?;
                }
            }

            tx.commit()
                .with_context(|| "failed to commit segment replacement")?;
            Ok(())
        })
        .await
    }
}
