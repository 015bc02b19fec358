pub mod config;
pub mod engine;
pub mod metrics;
pub mod scoring;

pub use config::{SegmentationConfig, StepRubric};
pub use engine::SegmentationEngine;
pub use metrics::{CustomerMetrics, MetricSummary};
