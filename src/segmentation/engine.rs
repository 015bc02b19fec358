use std::collections::BTreeMap;

use chrono::Utc;

use crate::db::Database;
use crate::error::AnalyticsError;
use crate::log_info;
use crate::segmentation::config::SegmentationConfig;
use crate::segmentation::metrics::{aggregate_customers, summarize, MetricSummary};
use crate::segmentation::scoring::{assign_segment, score_customer};

const ENABLE_LOGS: bool = true;

/// Recomputes every customer's segment assignment from scratch.
///
/// Each run aggregates the full engagement table, scores the rubric, and
/// atomically replaces the `customer_segments` table content for the scored
/// customers. Idempotent: re-running against unchanged data produces the
/// same mapping.
pub struct SegmentationEngine {
    db: Database,
    config: SegmentationConfig,
}

impl SegmentationEngine {
    pub fn new(db: Database, config: SegmentationConfig) -> Self {
        Self { db, config }
    }

    /// Run a full segmentation pass and return the persisted
    /// customer-to-segment mapping, ordered by customer id.
    ///
    /// An empty customer table yields an empty mapping and writes nothing;
    /// that situation is an upstream data problem, not an engine failure.
    pub async fn compute_segments(&self) -> Result<BTreeMap<i64, i64>, AnalyticsError> {
        let customers = self
            .db
            .get_customers()
            .await
            .map_err(AnalyticsError::Persistence)?;
        if customers.is_empty() {
            log_info!("Segmentation run skipped: no customers in store");
            return Ok(BTreeMap::new());
        }

        let engagements = self
            .db
            .get_engagements()
            .await
            .map_err(AnalyticsError::Persistence)?;
        let prices = self
            .db
            .get_customer_prices()
            .await
            .map_err(AnalyticsError::Persistence)?;

        let now = Utc::now();
        let metrics = aggregate_customers(&customers, &engagements, &prices, now, &self.config);

        // Customers arrive ordered by id, so assignment order (and the
        // sequential surrogate keys) is deterministic.
        let mut mapping = BTreeMap::new();
        let mut assignments = Vec::with_capacity(metrics.len());
        for m in &metrics {
            let scores = score_customer(m, &self.config);
            let segment_id = assign_segment(m, &scores, &self.config);
            mapping.insert(m.customer_id, segment_id);
            assignments.push((m.customer_id, segment_id));
        }

        self.db
            .replace_customer_segments(assignments)
            .await
            .map_err(AnalyticsError::Persistence)?;

        log_info!(
            "Segmentation run assigned {} customers across {} engagements",
            mapping.len(),
            engagements.len()
        );

        Ok(mapping)
    }

    /// Summary statistics of the aggregated customer metrics, one entry per
    /// rubric dimension. Informational only, nothing is persisted.
    pub async fn customer_statistics(&self) -> Result<Vec<MetricSummary>, AnalyticsError> {
        let customers = self
            .db
            .get_customers()
            .await
            .map_err(AnalyticsError::Persistence)?;
        let engagements = self
            .db
            .get_engagements()
            .await
            .map_err(AnalyticsError::Persistence)?;
        let prices = self
            .db
            .get_customer_prices()
            .await
            .map_err(AnalyticsError::Persistence)?;

        let now = Utc::now();
        let metrics = aggregate_customers(&customers, &engagements, &prices, now, &self.config);
        Ok(summarize(&metrics))
    }
}
