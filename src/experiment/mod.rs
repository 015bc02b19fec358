pub mod contingency;
pub mod evaluator;
pub mod stats;

pub use contingency::{ContingencyTable, GroupOutcome};
pub use evaluator::{EvaluationReport, ExperimentEvaluator};
pub use stats::ChiSquareTest;
