use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{connection::Database, models::ABTestResult};

fn row_to_result(row: &Row) -> Result<ABTestResult, rusqlite::Error> {
    Ok(ABTestResult {
        result_id: row.get("result_id")?,
        ab_test_id: row.get("ab_test_id")?,
        customer_id: row.get("customer_id")?,
        experiment_id: row.get("experiment_id")?,
        clicked_link: row.get("clicked_link")?,
    })
}

impl Database {
    /// Record that a customer was shown a variant as part of an experiment.
    /// Created unclicked; clicks arrive later via `mark_clicked`.
    pub async fn record_exposure(
        &self,
        ab_test_id: i64,
        customer_id: i64,
        experiment_id: i64,
    ) -> Result<i64> {
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO ab_test_results (ab_test_id, customer_id, experiment_id, clicked_link)
                 VALUES (?1, ?2, ?3, 0)",
                params![ab_test_id, customer_id, experiment_id],
            )
            .with_context(|| "failed to record exposure")?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    /// Flip an exposure to clicked. Monotonic: a click can never be undone,
    /// and marking an already-clicked exposure is a no-op. Returns whether
    /// the row transitioned.
    pub async fn mark_clicked(&self, result_id: i64) -> Result<bool> {
        self.execute(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE ab_test_results
                     SET clicked_link = 1
                     WHERE result_id = ?1 AND clicked_link = 0",
                    params![result_id],
                )
                .with_context(|| "failed to mark exposure clicked")?;
            Ok(changed > 0)
        })
        .await
    }

    pub async fn get_results_for_experiment(
        &self,
        experiment_id: i64,
    ) -> Result<Vec<ABTestResult>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT result_id, ab_test_id, customer_id, experiment_id, clicked_link
                 FROM ab_test_results
                 WHERE experiment_id = ?1
                 ORDER BY result_id ASC",
            )?;

            let rows = stmt.query_map(params![experiment_id], row_to_result)?;
            let mut results = Vec::new();
            for result in rows {
                results.push(result?);
            }

            Ok(results)
        })
        .await
    }
}
