use std::collections::BTreeSet;

use crate::db::Database;
use crate::error::AnalyticsError;
use crate::experiment::contingency::{ContingencyTable, GroupOutcome};
use crate::experiment::stats::chi_square_with_yates;
use crate::log_info;

const ENABLE_LOGS: bool = true;

/// Fixed significance threshold used for the report verdict. The raw
/// p-value is always persisted and returned regardless of it.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Outcome of evaluating one experiment. Informational except for the
/// p-value, which is also persisted onto the experiment row.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub experiment_id: i64,
    pub statistic: f64,
    pub p_value: f64,
    /// Variant outcomes ordered by ascending ab_test_id.
    pub groups: [GroupOutcome; 2],
    pub significant: bool,
    /// The ab_test_id with the higher click rate, reported only when the
    /// difference is significant.
    pub winner: Option<i64>,
}

/// Evaluates a collected experiment: partitions its exposures into the two
/// variant groups, runs the chi-square independence test and persists the
/// resulting p-value.
pub struct ExperimentEvaluator {
    db: Database,
}

impl ExperimentEvaluator {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Evaluate the experiment's click-through data.
    ///
    /// Preconditions are checked in order: exposures must exist, they must
    /// span exactly two distinct variants, both groups must be non-empty and
    /// the contingency table must have no zero cell. Nothing is persisted
    /// unless every precondition holds. Re-evaluation overwrites the stored
    /// p-value; with unchanged data the write is idempotent.
    pub async fn evaluate(&self, experiment_id: i64) -> Result<EvaluationReport, AnalyticsError> {
        let exposures = self
            .db
            .get_results_for_experiment(experiment_id)
            .await
            .map_err(AnalyticsError::Persistence)?;

        if exposures.is_empty() {
            return Err(AnalyticsError::NoData { experiment_id });
        }

        // Ascending ab_test_id gives a deterministic group labeling; the
        // storage return order carries no meaning.
        let variant_ids: BTreeSet<i64> = exposures.iter().map(|row| row.ab_test_id).collect();
        if variant_ids.len() != 2 {
            return Err(AnalyticsError::InvalidExperimentSetup {
                experiment_id,
                found: variant_ids.len(),
            });
        }

        let mut groups = Vec::with_capacity(2);
        for ab_test_id in variant_ids {
            let clicks = exposures
                .iter()
                .filter(|row| row.ab_test_id == ab_test_id && row.clicked_link)
                .count() as u64;
            let total = exposures
                .iter()
                .filter(|row| row.ab_test_id == ab_test_id)
                .count() as u64;
            if total == 0 {
                return Err(AnalyticsError::InsufficientGroupData { ab_test_id });
            }
            groups.push(GroupOutcome {
                ab_test_id,
                clicks,
                exposures: total,
            });
        }
        let groups = [groups[0], groups[1]];

        let table = ContingencyTable::from_groups(&groups[0], &groups[1]);
        if table.has_zero_cell() {
            return Err(AnalyticsError::DegenerateContingencyTable { table: table.cells });
        }

        let test = chi_square_with_yates(&table);

        self.db
            .set_experiment_p_value(experiment_id, test.p_value)
            .await
            .map_err(AnalyticsError::Persistence)?;

        let significant = test.p_value < SIGNIFICANCE_LEVEL;
        let winner = if significant {
            let best = if groups[0].click_rate() > groups[1].click_rate() {
                groups[0]
            } else {
                groups[1]
            };
            Some(best.ab_test_id)
        } else {
            None
        };

        log_info!(
            "Experiment {experiment_id}: variant {} {:.2}% vs variant {} {:.2}%, p = {:.4}{}",
            groups[0].ab_test_id,
            groups[0].click_rate() * 100.0,
            groups[1].ab_test_id,
            groups[1].click_rate() * 100.0,
            test.p_value,
            if significant {
                " (significant)"
            } else {
                " (not significant)"
            }
        );

        Ok(EvaluationReport {
            experiment_id,
            statistic: test.statistic,
            p_value: test.p_value,
            groups,
            significant,
            winner,
        })
    }
}
