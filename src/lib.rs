pub mod db;
pub mod error;
pub mod experiment;
pub mod segmentation;
mod utils;

pub use db::Database;
pub use error::AnalyticsError;
pub use experiment::{EvaluationReport, ExperimentEvaluator};
pub use segmentation::{SegmentationConfig, SegmentationEngine};
