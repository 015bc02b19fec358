#![allow(dead_code)]

use chrono::{Duration, Utc};
use reellift::db::models::LikeStatus;
use reellift::Database;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn open_db() -> Database {
    init_logging();
    Database::new_in_memory().expect("in-memory database")
}

pub async fn seed_subscription(db: &Database, name: &str, price: i64) -> i64 {
    db.insert_subscription(name, price).await.expect("insert subscription")
}

pub async fn seed_customer(db: &Database, name: &str, subscription_id: Option<i64>) -> i64 {
    db.insert_customer(
        name,
        &format!("{}@example.com", name.replace(' ', ".").to_lowercase()),
        subscription_id,
        None,
        Utc::now(),
    )
    .await
    .expect("insert customer")
}

/// Insert `count` engagements for the customer, spread over recent days.
/// `liked` of them are Liked, then `disliked` Disliked, the rest No Action.
pub async fn seed_engagements(
    db: &Database,
    customer_id: i64,
    count: u32,
    duration_each: i64,
    liked: u32,
    disliked: u32,
) {
    assert!(liked + disliked <= count);
    for i in 0..count {
        let status = if i < liked {
            LikeStatus::Liked
        } else if i < liked + disliked {
            LikeStatus::Disliked
        } else {
            LikeStatus::NoAction
        };
        db.insert_engagement(
            customer_id,
            None,
            Utc::now() - Duration::days(i64::from(i) + 1),
            duration_each,
            i % 2 == 0,
            status,
        )
        .await
        .expect("insert engagement");
    }
}

/// Record `total` exposures of one variant for an experiment, the first
/// `clicks` of them clicked. Exposures are spread across the given customers.
pub async fn seed_exposures(
    db: &Database,
    ab_test_id: i64,
    experiment_id: i64,
    customer_ids: &[i64],
    clicks: u64,
    total: u64,
) {
    assert!(clicks <= total);
    assert!(!customer_ids.is_empty());
    for i in 0..total {
        let customer_id = customer_ids[(i as usize) % customer_ids.len()];
        let result_id = db
            .record_exposure(ab_test_id, customer_id, experiment_id)
            .await
            .expect("record exposure");
        if i < clicks {
            assert!(db.mark_clicked(result_id).await.expect("mark clicked"));
        }
    }
}
