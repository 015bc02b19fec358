use crate::db::models::segment_ids;
use crate::segmentation::config::SegmentationConfig;
use crate::segmentation::metrics::CustomerMetrics;

/// The five independent dimension scores for one customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionScores {
    pub frequency: u32,
    pub duration: u32,
    pub monetary: u32,
    pub liked: u32,
    pub disliked: u32,
}

impl DimensionScores {
    pub fn total(&self) -> u32 {
        self.frequency + self.duration + self.monetary + self.liked + self.disliked
    }
}

/// Lowest monetary score, also used when no price exists to score at all.
const MONETARY_FLOOR: u32 = 1;

/// Score a subscription price. The base plan scores the floor by exact
/// match; other prices run through the rubric ladder.
///
/// A customer with no subscription has no price to score; that also scores
/// the floor, since a customer we cannot bill shows no perceptible monetary
/// value.
fn score_monetary(price: Option<i64>, config: &SegmentationConfig) -> u32 {
    match price {
        None => MONETARY_FLOOR,
        Some(price) if price == config.monetary_base_price => MONETARY_FLOOR,
        Some(price) => config.monetary.score(price),
    }
}

/// Score each rubric dimension for one aggregated customer record.
pub fn score_customer(metrics: &CustomerMetrics, config: &SegmentationConfig) -> DimensionScores {
    DimensionScores {
        frequency: config.frequency.score(i64::from(metrics.frequency)),
        duration: config.total_duration.score(metrics.total_duration),
        monetary: score_monetary(metrics.monetary, config),
        liked: config.liked.score(i64::from(metrics.liked_count)),
        disliked: config.disliked.score(i64::from(metrics.disliked_count)),
    }
}

/// Map a customer's total score to a segment id.
///
/// Customers with zero engagements are always Lost Cause: a subscription
/// price alone says nothing about genuine engagement.
pub fn assign_segment(
    metrics: &CustomerMetrics,
    scores: &DimensionScores,
    config: &SegmentationConfig,
) -> i64 {
    if !metrics.has_engagements() {
        return segment_ids::LOST_CAUSE;
    }

    let total = scores.total();
    let [first, second, third] = config.segment_bounds;
    if total <= first {
        segment_ids::LOST_CAUSE
    } else if total <= second {
        segment_ids::VULNERABLE_CUSTOMERS
    } else if total <= third {
        segment_ids::FREE_RIDERS
    } else {
        segment_ids::STAR_CUSTOMERS
    }
}
