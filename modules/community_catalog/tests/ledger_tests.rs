//! Price ledger integration tests

mod common;

use chrono::{Duration, Utc};
use common::TestCatalog;
use community_catalog::contract::CatalogError;
use rust_decimal::Decimal;
use uuid::Uuid;

fn price(dollars: i64) -> Decimal {
    Decimal::new(dollars, 0)
}

#[tokio::test]
async fn appended_event_is_visible_within_window() {
    let catalog = TestCatalog::new();
    let community = catalog.seed_community("Elevon").await;
    let company = catalog.seed_company("BuilderCo").await;
    let plan = catalog
        .seed_plan("Plan A", &community, &company, price(450_000))
        .await;

    catalog
        .ledger
        .record_change(plan.id, Some(price(450_000)), price(440_000), Utc::now())
        .await
        .unwrap();

    let changed = catalog
        .ledger
        .changed_within(&[plan.id], Duration::hours(24))
        .await
        .unwrap();
    assert!(changed.contains(&plan.id));
}

#[tokio::test]
async fn event_before_window_start_is_excluded() {
    let catalog = TestCatalog::new();
    let community = catalog.seed_community("Elevon").await;
    let company = catalog.seed_company("BuilderCo").await;
    let plan = catalog
        .seed_plan("Plan A", &community, &company, price(450_000))
        .await;

    catalog
        .ledger
        .record_change(
            plan.id,
            Some(price(450_000)),
            price(440_000),
            Utc::now() - Duration::hours(30),
        )
        .await
        .unwrap();

    let changed = catalog
        .ledger
        .changed_within(&[plan.id], Duration::hours(24))
        .await
        .unwrap();
    assert!(changed.is_empty());
}

#[tokio::test]
async fn oscillating_prices_each_produce_an_event() {
    let catalog = TestCatalog::new();
    let community = catalog.seed_community("Elevon").await;
    let company = catalog.seed_company("BuilderCo").await;
    let plan = catalog
        .seed_plan("Plan A", &community, &company, price(450_000))
        .await;

    catalog
        .ledger
        .apply_observed_price(plan.id, price(440_000))
        .await
        .unwrap();
    catalog
        .ledger
        .apply_observed_price(plan.id, price(450_000))
        .await
        .unwrap();
    catalog
        .ledger
        .apply_observed_price(plan.id, price(440_000))
        .await
        .unwrap();

    let history = catalog.ledger.history_for_plan(plan.id).await.unwrap();
    assert_eq!(history.len(), 3);
    // Newest first
    assert_eq!(history[0].new_price, price(440_000));
    assert_eq!(history[0].old_price, Some(price(450_000)));
}

#[tokio::test]
async fn unchanged_price_is_a_no_op() {
    let catalog = TestCatalog::new();
    let community = catalog.seed_community("Elevon").await;
    let company = catalog.seed_company("BuilderCo").await;
    let plan = catalog
        .seed_plan("Plan A", &community, &company, price(450_000))
        .await;

    let updated = catalog
        .ledger
        .apply_observed_price(plan.id, price(450_000))
        .await
        .unwrap();

    assert_eq!(updated.price, Some(price(450_000)));
    assert_eq!(catalog.history.event_count(), 0);
}

#[tokio::test]
async fn observed_change_updates_plan_and_appends_event() {
    let catalog = TestCatalog::new();
    let community = catalog.seed_community("Elevon").await;
    let company = catalog.seed_company("BuilderCo").await;
    let plan = catalog
        .seed_plan("Plan A", &community, &company, price(450_000))
        .await;

    let updated = catalog
        .ledger
        .apply_observed_price(plan.id, price(439_990))
        .await
        .unwrap();

    assert_eq!(updated.price, Some(price(439_990)));
    let history = catalog.ledger.history_for_plan(plan.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].old_price, Some(price(450_000)));
    assert_eq!(history[0].new_price, price(439_990));

    // Round-trip: the fresh event is inside any window containing now
    let changed = catalog
        .ledger
        .changed_within(&[plan.id], Duration::minutes(5))
        .await
        .unwrap();
    assert!(changed.contains(&plan.id));
}

#[tokio::test]
async fn unknown_plan_is_not_found() {
    let catalog = TestCatalog::new();

    let result = catalog
        .ledger
        .apply_observed_price(Uuid::new_v4(), price(100_000))
        .await;
    assert!(matches!(result, Err(CatalogError::NotFound { .. })));
}

#[tokio::test]
async fn changed_within_only_reports_candidates() {
    let catalog = TestCatalog::new();
    let community = catalog.seed_community("Elevon").await;
    let company = catalog.seed_company("BuilderCo").await;
    let plan_a = catalog
        .seed_plan("Plan A", &community, &company, price(450_000))
        .await;
    let plan_b = catalog
        .seed_plan("Plan B", &community, &company, price(500_000))
        .await;

    catalog
        .ledger
        .apply_observed_price(plan_a.id, price(440_000))
        .await
        .unwrap();
    catalog
        .ledger
        .apply_observed_price(plan_b.id, price(490_000))
        .await
        .unwrap();

    let changed = catalog
        .ledger
        .changed_within(&[plan_b.id], Duration::hours(24))
        .await
        .unwrap();
    assert_eq!(changed.len(), 1);
    assert!(changed.contains(&plan_b.id));
}
