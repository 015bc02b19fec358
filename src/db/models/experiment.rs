use serde::{Deserialize, Serialize};

/// A single A/B comparison run. `p_value` is NULL until the evaluator
/// completes; callers must never read the missing value as 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub experiment_id: i64,
    pub p_value: Option<f64>,
}
