use serde::{Deserialize, Serialize};

/// Well-known ids of the four seeded reference segments.
pub mod segment_ids {
    pub const LOST_CAUSE: i64 = 1;
    pub const VULNERABLE_CUSTOMERS: i64 = 2;
    pub const FREE_RIDERS: i64 = 3;
    pub const STAR_CUSTOMERS: i64 = 4;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub segment_id: i64,
    pub segment_name: String,
    pub segment_description: Option<String>,
}

/// Assignment edge between a customer and a segment. Fully owned by the
/// segmentation engine: each run replaces the whole assignment set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSegment {
    pub customer_segment_id: i64,
    pub customer_id: i64,
    pub segment_id: i64,
}
