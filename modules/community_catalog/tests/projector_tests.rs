//! Plan projector integration tests

mod common;

use chrono::{Duration, Utc};
use common::TestCatalog;
use community_catalog::contract::{
    CatalogError, Plan, PlanCommunityRef, PlanCompanyRef, PlanKind,
};
use community_catalog::domain::PlanRepository;
use rust_decimal::Decimal;
use uuid::Uuid;

fn price(dollars: i64) -> Decimal {
    Decimal::new(dollars, 0)
}

#[tokio::test]
async fn recent_change_is_flagged_within_default_window_only() {
    let catalog = TestCatalog::new();
    let community = catalog.seed_community("Elevon").await;
    let company = catalog.seed_company("BuilderCo").await;
    let plan = catalog
        .seed_plan("Plan A", &community, &company, price(450_000))
        .await;

    // Price change recorded 2 hours ago
    catalog
        .ledger
        .record_change(
            plan.id,
            Some(price(460_000)),
            price(450_000),
            Utc::now() - Duration::hours(2),
        )
        .await
        .unwrap();

    let within_24h = catalog
        .projector
        .project_for_community(&community.id.to_string(), None)
        .await
        .unwrap();
    assert_eq!(within_24h.len(), 1);
    assert!(within_24h[0].price_changed_recently);

    let within_1h = catalog
        .projector
        .project_for_community(&community.id.to_string(), Some(Duration::hours(1)))
        .await
        .unwrap();
    assert!(!within_1h[0].price_changed_recently);
}

#[tokio::test]
async fn malformed_community_id_is_not_found() {
    let catalog = TestCatalog::new();

    let result = catalog
        .projector
        .project_for_community("not-a-uuid", None)
        .await;
    assert!(matches!(result, Err(CatalogError::NotFound { .. })));
}

#[tokio::test]
async fn unknown_community_is_not_found_not_empty() {
    let catalog = TestCatalog::new();

    let result = catalog
        .projector
        .project_for_community(&Uuid::new_v4().to_string(), None)
        .await;
    assert!(matches!(result, Err(CatalogError::NotFound { .. })));
}

#[tokio::test]
async fn community_without_plans_projects_empty() {
    let catalog = TestCatalog::new();
    let community = catalog.seed_community("Elevon").await;

    let views = catalog
        .projector
        .project_for_community(&community.id.to_string(), None)
        .await
        .unwrap();
    assert!(views.is_empty());
}

#[tokio::test]
async fn partially_ingested_plans_are_never_surfaced() {
    let catalog = TestCatalog::new();
    let community = catalog.seed_community("Elevon").await;
    let company = catalog.seed_company("BuilderCo").await;
    catalog
        .seed_plan("Plan A", &community, &company, price(450_000))
        .await;

    // Plan with no price, written directly by a partial ingestion
    catalog
        .plans
        .insert(&Plan {
            id: Uuid::new_v4(),
            name: Some("Plan B".to_string()),
            price: None,
            sqft: None,
            stories: None,
            beds: None,
            baths: None,
            address: None,
            kind: PlanKind::Plan,
            company: PlanCompanyRef {
                id: Some(company.id),
                name: Some(company.name.clone()),
            },
            community: PlanCommunityRef {
                id: Some(community.id),
                name: Some(community.name.clone()),
                location: None,
            },
            last_updated: Utc::now(),
        })
        .await
        .unwrap();

    let views = catalog
        .projector
        .project_for_community(&community.id.to_string(), None)
        .await
        .unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].name, "Plan A");
}

#[tokio::test]
async fn plans_are_ordered_by_last_updated_descending() {
    let catalog = TestCatalog::new();
    let community = catalog.seed_community("Elevon").await;
    let company = catalog.seed_company("BuilderCo").await;
    catalog
        .seed_plan("Plan A", &community, &company, price(450_000))
        .await;
    let plan_b = catalog
        .seed_plan("Plan B", &community, &company, price(500_000))
        .await;

    // Touch plan B with a newer price so it sorts first
    catalog
        .ledger
        .apply_observed_price(plan_b.id, price(495_000))
        .await
        .unwrap();

    let views = catalog
        .projector
        .project_for_community(&community.id.to_string(), None)
        .await
        .unwrap();
    let names: Vec<&str> = views.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Plan B", "Plan A"]);
}

#[tokio::test]
async fn views_carry_flat_names_and_nested_references() {
    let catalog = TestCatalog::new();
    let community = catalog.seed_community("Elevon").await;
    let company = catalog.seed_company("BuilderCo").await;
    catalog
        .seed_plan("Plan A", &community, &company, price(450_000))
        .await;

    let views = catalog
        .projector
        .project_for_community(&community.id.to_string(), None)
        .await
        .unwrap();
    let view = &views[0];

    assert_eq!(view.company_name, "BuilderCo");
    assert_eq!(view.community_name, "Elevon");
    assert_eq!(view.company.id, Some(company.id));
    assert_eq!(view.company.name.as_deref(), Some("BuilderCo"));
    assert_eq!(view.community.id, Some(community.id));
    assert_eq!(view.price, price(450_000));
    assert!(!view.price_changed_recently);
}
