use thiserror::Error;

/// Failure conditions surfaced by the segmentation engine and the experiment
/// evaluator.
///
/// None of these are transient: they describe genuine data or setup problems
/// that need operator attention before a re-run makes sense. When one is
/// returned, no partial state has been persisted.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// No exposure rows exist for the requested experiment.
    #[error("no exposure data recorded for experiment {experiment_id}")]
    NoData { experiment_id: i64 },

    /// The experiment's exposures reference a number of distinct variants
    /// other than two.
    #[error(
        "experiment {experiment_id} references {found} distinct variant(s), exactly 2 required"
    )]
    InvalidExperimentSetup { experiment_id: i64, found: usize },

    /// One of the two variant groups has zero exposures.
    #[error("variant {ab_test_id} has no exposures, groups cannot be compared")]
    InsufficientGroupData { ab_test_id: i64 },

    /// The 2x2 contingency table has an empty cell, which makes the
    /// chi-square statistic meaningless.
    #[error("degenerate contingency table {table:?}, every cell must be non-zero")]
    DegenerateContingencyTable { table: [[u64; 2]; 2] },

    /// A storage read or write failed.
    #[error("storage operation failed: {0}")]
    Persistence(#[source] anyhow::Error),
}
