pub mod customer;
pub mod engagement;
pub mod experiment;
pub mod movie;
pub mod segment;
pub mod subscription;

pub use ab_test::{ABTest, ABTestResult};
pub use customer::Customer;
pub use engagement::{Engagement, LikeStatus};
pub use experiment::Experiment;
pub use movie::Movie;
pub use segment::{segment_ids, CustomerSegment, Segment};
pub use subscription::Subscription;
