//! Native client trait for inter-module communication
//!
//! This trait defines the API that the ingestion job and the read-side API
//! layer use to interact with the catalog core. NO HTTP - direct function
//! calls for performance.

use super::error::CatalogError;
use super::model::{
    Community, CommunityUpdate, Company, NewCommunity, NewCompany, Plan, PlanDraft, PlanView,
    PriceChange, ProductSegment, ResolveRequest, ResolvedEntities,
};
use async_trait::async_trait;
use chrono::Duration;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Catalog API for inter-module communication
#[async_trait]
pub trait CatalogApi: Send + Sync {
    // ===== Resolution =====

    /// Resolve loose identifying input to canonical entities and the
    /// display names an external source should see
    async fn resolve(&self, request: &ResolveRequest) -> Result<ResolvedEntities, CatalogError>;

    // ===== Projection =====

    /// Project the plans of a community, annotated with recent price-change
    /// flags; `window` defaults to the configured recency window
    async fn project_for_community(
        &self,
        community_id: &str,
        window: Option<Duration>,
    ) -> Result<Vec<PlanView>, CatalogError>;

    // ===== Ingestion =====

    /// Upsert a plan by its natural key, routing price changes through the
    /// price ledger
    async fn record_plan(&self, draft: PlanDraft) -> Result<Plan, CatalogError>;

    /// Apply a newly observed price to an existing plan
    async fn apply_observed_price(
        &self,
        plan_id: Uuid,
        new_price: Decimal,
    ) -> Result<Plan, CatalogError>;

    /// Audit read of a plan's price-change log, newest first
    async fn price_history(&self, plan_id: Uuid) -> Result<Vec<PriceChange>, CatalogError>;

    // ===== Registry administration =====

    /// Create a canonical community
    async fn create_community(&self, new: NewCommunity) -> Result<Community, CatalogError>;

    /// Partially update a community
    async fn update_community(
        &self,
        id: Uuid,
        update: CommunityUpdate,
    ) -> Result<Community, CatalogError>;

    /// Create a canonical company
    async fn create_company(&self, new: NewCompany) -> Result<Company, CatalogError>;

    /// Create or update a product segment (unique name per community)
    async fn upsert_segment(
        &self,
        community_id: Uuid,
        name: &str,
        label: &str,
        active: bool,
        display_order: i32,
    ) -> Result<ProductSegment, CatalogError>;

    /// Set or clear the community name override used by one company's source
    async fn set_community_alias(
        &self,
        community_id: Uuid,
        company_id: Uuid,
        name_used_by_company: Option<String>,
    ) -> Result<(), CatalogError>;

    /// Set or clear the segment label override used by one company's source
    async fn set_segment_alias(
        &self,
        segment_id: Uuid,
        company_id: Uuid,
        segment_label_as_company: Option<String>,
    ) -> Result<(), CatalogError>;

    /// Recompute a company's denormalized community/plan counters
    async fn refresh_company_totals(&self, company_id: Uuid) -> Result<Company, CatalogError>;
}
