use anyhow::{bail, Context, Result};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{connection::Database, models::Experiment};

fn row_to_experiment(row: &Row) -> Result<Experiment, rusqlite::Error> {
    Ok(Experiment {
        experiment_id: row.get("experiment_id")?,
        p_value: row.get("p_value")?,
    })
}

impl Database {
    /// Create an experiment row with a NULL p-value placeholder and return
    /// its generated id.
    pub async fn create_experiment(&self) -> Result<i64> {
        self.execute(|conn| {
            conn.execute("INSERT INTO experiments (p_value) VALUES (NULL)", [])
                .with_context(|| "failed to create experiment")?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    pub async fn get_experiment(&self, experiment_id: i64) -> Result<Option<Experiment>> {
        self.execute(move |conn| {
            conn.query_row(
                "SELECT experiment_id, p_value
                 FROM experiments
                 WHERE experiment_id = ?1",
                params![experiment_id],
                row_to_experiment,
            )
            .optional()
            .with_context(|| "failed to load experiment")
        })
        .await
    }

    /// Overwrite the experiment's p-value. Update only: the row must already
    /// exist, created when the experiment was initiated.
    pub async fn set_experiment_p_value(&self, experiment_id: i64, p_value: f64) -> Result<()> {
        self.execute(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE experiments SET p_value = ?1 WHERE experiment_id = ?2",
                    params![p_value, experiment_id],
                )
                .with_context(|| "failed to update experiment p_value")?;

            if changed == 0 {
                bail!("experiment {experiment_id} does not exist");
            }
            Ok(())
        })
        .await
    }
}
