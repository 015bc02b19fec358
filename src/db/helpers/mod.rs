use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

use crate::db::models::LikeStatus;

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_like_status(value: &str) -> Result<LikeStatus> {
    match value {
        "Liked" => Ok(LikeStatus::Liked),
        "Disliked" => Ok(LikeStatus::Disliked),
        "No Action" => Ok(LikeStatus::NoAction),
        other => Err(anyhow!("unknown like status {other}")),
    }
}
