mod common;

use common::{open_db, seed_customer, seed_exposures};
use reellift::db::Database;
use reellift::{AnalyticsError, ExperimentEvaluator};

async fn seed_audience(db: &Database, size: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(size);
    for i in 0..size {
        ids.push(seed_customer(db, &format!("recipient {i}"), None).await);
    }
    ids
}

async fn seed_variants(db: &Database) -> (i64, i64) {
    let a = db
        .insert_ab_test("subscription", "Star Customers", 1, Some("Upgrade today, {name}!"))
        .await
        .expect("insert variant 1");
    let b = db
        .insert_ab_test("subscription", "Star Customers", 2, Some("{name}, your next favorite awaits"))
        .await
        .expect("insert variant 2");
    (a, b)
}

#[tokio::test]
async fn detects_significant_difference_and_persists_p_value() {
    let db = open_db();
    let audience = seed_audience(&db, 10).await;
    let (variant_a, variant_b) = seed_variants(&db).await;
    let experiment_id = db.create_experiment().await.expect("create experiment");

    // A: 50/100 clicked, B: 30/100. Reference p = 0.0061.
    seed_exposures(&db, variant_a, experiment_id, &audience, 50, 100).await;
    seed_exposures(&db, variant_b, experiment_id, &audience, 30, 100).await;

    let evaluator = ExperimentEvaluator::new(db.clone());
    let report = evaluator.evaluate(experiment_id).await.expect("evaluation");

    assert!((report.p_value - 0.0061).abs() < 1e-3);
    assert!(report.significant);
    assert_eq!(report.winner, Some(variant_a));
    assert_eq!(report.groups[0].ab_test_id, variant_a);
    assert_eq!(report.groups[0].clicks, 50);
    assert_eq!(report.groups[0].exposures, 100);
    assert!((report.groups[0].click_rate() - 0.5).abs() < 1e-12);
    assert_eq!(report.groups[1].ab_test_id, variant_b);
    assert!((report.groups[1].click_rate() - 0.3).abs() < 1e-12);

    let stored = db
        .get_experiment(experiment_id)
        .await
        .expect("load experiment")
        .expect("experiment exists");
    assert_eq!(stored.p_value, Some(report.p_value));
}

#[tokio::test]
async fn close_rates_are_not_significant() {
    let db = open_db();
    let audience = seed_audience(&db, 5).await;
    let (variant_a, variant_b) = seed_variants(&db).await;
    let experiment_id = db.create_experiment().await.expect("create experiment");

    seed_exposures(&db, variant_a, experiment_id, &audience, 42, 100).await;
    seed_exposures(&db, variant_b, experiment_id, &audience, 40, 100).await;

    let evaluator = ExperimentEvaluator::new(db.clone());
    let report = evaluator.evaluate(experiment_id).await.expect("evaluation");

    assert!(!report.significant);
    assert_eq!(report.winner, None);
    assert!(report.p_value >= 0.05);
}

#[tokio::test]
async fn no_exposures_is_a_no_data_error() {
    let db = open_db();
    let experiment_id = db.create_experiment().await.expect("create experiment");

    let evaluator = ExperimentEvaluator::new(db.clone());
    let err = evaluator.evaluate(experiment_id).await.unwrap_err();

    assert!(matches!(
        err,
        AnalyticsError::NoData { experiment_id: id } if id == experiment_id
    ));
    let stored = db
        .get_experiment(experiment_id)
        .await
        .expect("load experiment")
        .expect("experiment exists");
    assert_eq!(stored.p_value, None, "no p-value written on failure");
}

#[tokio::test]
async fn single_variant_is_invalid_setup() {
    let db = open_db();
    let audience = seed_audience(&db, 3).await;
    let (variant_a, _) = seed_variants(&db).await;
    let experiment_id = db.create_experiment().await.expect("create experiment");

    seed_exposures(&db, variant_a, experiment_id, &audience, 5, 20).await;

    let evaluator = ExperimentEvaluator::new(db.clone());
    let err = evaluator.evaluate(experiment_id).await.unwrap_err();

    assert!(matches!(
        err,
        AnalyticsError::InvalidExperimentSetup { found: 1, .. }
    ));
}

#[tokio::test]
async fn three_variants_is_invalid_setup() {
    let db = open_db();
    let audience = seed_audience(&db, 3).await;
    let (variant_a, variant_b) = seed_variants(&db).await;
    let variant_c = db
        .insert_ab_test("subscription", "Star Customers", 3, None)
        .await
        .expect("insert variant 3");
    let experiment_id = db.create_experiment().await.expect("create experiment");

    seed_exposures(&db, variant_a, experiment_id, &audience, 3, 10).await;
    seed_exposures(&db, variant_b, experiment_id, &audience, 4, 10).await;
    seed_exposures(&db, variant_c, experiment_id, &audience, 5, 10).await;

    let evaluator = ExperimentEvaluator::new(db.clone());
    let err = evaluator.evaluate(experiment_id).await.unwrap_err();

    assert!(matches!(
        err,
        AnalyticsError::InvalidExperimentSetup { found: 3, .. }
    ));
}

#[tokio::test]
async fn zero_cell_table_is_rejected() {
    let db = open_db();
    let audience = seed_audience(&db, 4).await;
    let (variant_a, variant_b) = seed_variants(&db).await;
    let experiment_id = db.create_experiment().await.expect("create experiment");

    // Variant A never clicked: [[0, 100], [5, 95]] has a zero cell.
    seed_exposures(&db, variant_a, experiment_id, &audience, 0, 100).await;
    seed_exposures(&db, variant_b, experiment_id, &audience, 5, 100).await;

    let evaluator = ExperimentEvaluator::new(db.clone());
    let err = evaluator.evaluate(experiment_id).await.unwrap_err();

    assert!(matches!(
        err,
        AnalyticsError::DegenerateContingencyTable {
            table: [[0, 100], [5, 95]]
        }
    ));
    let stored = db
        .get_experiment(experiment_id)
        .await
        .expect("load experiment")
        .expect("experiment exists");
    assert_eq!(stored.p_value, None, "no p-value written on failure");
}

#[tokio::test]
async fn reevaluation_overwrites_with_same_p_value() {
    let db = open_db();
    let audience = seed_audience(&db, 6).await;
    let (variant_a, variant_b) = seed_variants(&db).await;
    let experiment_id = db.create_experiment().await.expect("create experiment");

    seed_exposures(&db, variant_a, experiment_id, &audience, 50, 100).await;
    seed_exposures(&db, variant_b, experiment_id, &audience, 30, 100).await;

    let evaluator = ExperimentEvaluator::new(db.clone());
    let first = evaluator.evaluate(experiment_id).await.expect("first run");
    let second = evaluator.evaluate(experiment_id).await.expect("second run");

    assert_eq!(first, second);
    let stored = db
        .get_experiment(experiment_id)
        .await
        .expect("load experiment")
        .expect("experiment exists");
    assert_eq!(stored.p_value, Some(second.p_value));
}

#[tokio::test]
async fn variant_groups_are_ordered_by_ascending_id() {
    let db = open_db();
    let audience = seed_audience(&db, 4).await;
    let (variant_a, variant_b) = seed_variants(&db).await;
    let experiment_id = db.create_experiment().await.expect("create experiment");

    // Insert the higher-id variant's exposures first; ordering must not
    // depend on storage return order.
    seed_exposures(&db, variant_b, experiment_id, &audience, 20, 60).await;
    seed_exposures(&db, variant_a, experiment_id, &audience, 10, 60).await;

    let evaluator = ExperimentEvaluator::new(db.clone());
    let report = evaluator.evaluate(experiment_id).await.expect("evaluation");

    assert!(variant_a < variant_b);
    assert_eq!(report.groups[0].ab_test_id, variant_a);
    assert_eq!(report.groups[1].ab_test_id, variant_b);
}

#[tokio::test]
async fn clicks_are_monotonic() {
    let db = open_db();
    let customer = seed_customer(&db, "clicker", None).await;
    let (variant_a, _) = seed_variants(&db).await;
    let experiment_id = db.create_experiment().await.expect("create experiment");

    let result_id = db
        .record_exposure(variant_a, customer, experiment_id)
        .await
        .expect("record exposure");

    assert!(db.mark_clicked(result_id).await.expect("first click"));
    assert!(
        !db.mark_clicked(result_id).await.expect("second click"),
        "already-clicked exposure does not transition again"
    );

    let rows = db
        .get_results_for_experiment(experiment_id)
        .await
        .expect("load exposures");
    assert_eq!(rows.len(), 1);
    assert!(rows[0].clicked_link);
}
