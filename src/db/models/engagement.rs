use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LikeStatus {
    Liked,
    Disliked,
    NoAction,
}

impl LikeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeStatus::Liked => "Liked",
            LikeStatus::Disliked => "Disliked",
            LikeStatus::NoAction => "No Action",
        }
    }
}

/// One customer-movie viewing session. Consumed only in aggregate by the
/// segmentation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    pub engagement_id: i64,
    pub customer_id: i64,
    pub movie_id: Option<i64>,
    pub session_date: DateTime<Utc>,
    /// Session length in seconds.
    pub session_duration: i64,
    pub watched_fully: bool,
    pub like_status: LikeStatus,
}
