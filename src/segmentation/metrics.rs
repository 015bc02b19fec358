use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::db::models::{Customer, Engagement, LikeStatus};
use crate::segmentation::config::SegmentationConfig;

/// Aggregated engagement and monetary profile for one customer, the typed
/// record the scoring rubrics operate on.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerMetrics {
    pub customer_id: i64,
    /// Number of engagement rows.
    pub frequency: u32,
    /// Summed session duration in seconds.
    pub total_duration: i64,
    pub watched_fully_true: u32,
    pub watched_fully_false: u32,
    pub liked_count: u32,
    pub disliked_count: u32,
    pub last_session_date: Option<DateTime<Utc>>,
    /// Days since the last session; the configured sentinel for customers
    /// who never engaged.
    pub recency_days: i64,
    /// Subscription price, if the customer has a plan.
    pub monetary: Option<i64>,
}

impl CustomerMetrics {
    pub fn has_engagements(&self) -> bool {
        self.frequency > 0
    }
}

#[derive(Debug, Default)]
struct EngagementAccumulator {
    frequency: u32,
    total_duration: i64,
    watched_fully_true: u32,
    watched_fully_false: u32,
    liked_count: u32,
    disliked_count: u32,
    last_session_date: Option<DateTime<Utc>>,
}

impl EngagementAccumulator {
    fn fold(&mut self, engagement: &Engagement) {
        self.frequency += 1;
        self.total_duration += engagement.session_duration;
        if engagement.watched_fully {
            self.watched_fully_true += 1;
        } else {
            self.watched_fully_false += 1;
        }
        match engagement.like_status {
            LikeStatus::Liked => self.liked_count += 1,
            LikeStatus::Disliked => self.disliked_count += 1,
            LikeStatus::NoAction => {}
        }
        let is_latest = self
            .last_session_date
            .map_or(true, |latest| engagement.session_date > latest);
        if is_latest {
            self.last_session_date = Some(engagement.session_date);
        }
    }
}

/// Aggregate engagements per customer and join subscription prices, keeping
/// every customer (outer join): customers with no engagement rows get zeroed
/// aggregates and the sentinel recency.
pub fn aggregate_customers(
    customers: &[Customer],
    engagements: &[Engagement],
    prices: &HashMap<i64, i64>,
    now: DateTime<Utc>,
    config: &SegmentationConfig,
) -> Vec<CustomerMetrics> {
    let mut by_customer: HashMap<i64, EngagementAccumulator> = HashMap::new();
    for engagement in engagements {
        by_customer
            .entry(engagement.customer_id)
            .or_default()
            .fold(engagement);
    }

    customers
        .iter()
        .map(|customer| {
            let acc = by_customer
                .remove(&customer.customer_id)
                .unwrap_or_default();
            let recency_days = match acc.last_session_date {
                Some(last) => (now - last).num_days().max(0),
                None => config.never_engaged_recency_days,
            };
            CustomerMetrics {
                customer_id: customer.customer_id,
                frequency: acc.frequency,
                total_duration: acc.total_duration,
                watched_fully_true: acc.watched_fully_true,
                watched_fully_false: acc.watched_fully_false,
                liked_count: acc.liked_count,
                disliked_count: acc.disliked_count,
                last_session_date: acc.last_session_date,
                recency_days,
                monetary: prices.get(&customer.customer_id).copied(),
            }
        })
        .collect()
}

/// Summary statistics for one metric dimension across all customers.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    pub metric: &'static str,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

fn describe(metric: &'static str, values: &[f64]) -> MetricSummary {
    if values.is_empty() {
        return MetricSummary {
            metric,
            count: 0,
            mean: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    // Sample standard deviation; zero when a single observation.
    let std_dev = if count > 1 {
        let variance = values
            .iter()
            .map(|v| {
                let d = v - mean;
                d * d
            })
            .sum::<f64>()
            / (count - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    MetricSummary {
        metric,
        count,
        mean,
        std_dev,
        min,
        max,
    }
}

/// Summary statistics over the aggregated records, one entry per metric
/// dimension. Monetary covers only customers with a subscription.
pub fn summarize(metrics: &[CustomerMetrics]) -> Vec<MetricSummary> {
    let collect = |f: fn(&CustomerMetrics) -> f64| -> Vec<f64> {
        metrics.iter().map(f).collect()
    };

    let monetary: Vec<f64> = metrics
        .iter()
        .filter_map(|m| m.monetary)
        .map(|p| p as f64)
        .collect();

    vec![
        describe("frequency", &collect(|m| m.frequency as f64)),
        describe("total_duration", &collect(|m| m.total_duration as f64)),
        describe("monetary", &monetary),
        describe(
            "watched_fully_true",
            &collect(|m| m.watched_fully_true as f64),
        ),
        describe(
            "watched_fully_false",
            &collect(|m| m.watched_fully_false as f64),
        ),
        describe("liked_count", &collect(|m| m.liked_count as f64)),
        describe("disliked_count", &collect(|m| m.disliked_count as f64)),
    ]
}
