use serde::{Deserialize, Serialize};

/// A subscription plan. `price` stands in for monetary value in the
/// segmentation rubric.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub subscription_id: i64,
    pub subscription_name: String,
    pub price: i64,
}
