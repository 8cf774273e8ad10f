//! Native client implementation - wraps domain services for in-process calls

use crate::contract::{
    CatalogApi, CatalogError, Community, CommunityUpdate, Company, NewCommunity, NewCompany, Plan,
    PlanDraft, PlanView, PriceChange, ProductSegment, ResolveRequest, ResolvedEntities,
};
use crate::domain::{PlanProjector, PriceLedger, Registry, Resolver};
use async_trait::async_trait;
use chrono::Duration;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// Native client implementation that directly calls the domain services
///
/// This client is used for in-process communication without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    resolver: Arc<Resolver>,
    projector: Arc<PlanProjector>,
    registry: Arc<Registry>,
    ledger: Arc<PriceLedger>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(
        resolver: Arc<Resolver>,
        projector: Arc<PlanProjector>,
        registry: Arc<Registry>,
        ledger: Arc<PriceLedger>,
    ) -> Self {
        Self {
            resolver,
            projector,
            registry,
            ledger,
        }
    }
}

#[async_trait]
impl CatalogApi for NativeClient {
    async fn resolve(&self, request: &ResolveRequest) -> Result<ResolvedEntities, CatalogError> {
        self.resolver.resolve(request).await
    }

    async fn project_for_community(
        &self,
        community_id: &str,
        window: Option<Duration>,
    ) -> Result<Vec<PlanView>, CatalogError> {
        self.projector
            .project_for_community(community_id, window)
            .await
    }

    async fn record_plan(&self, draft: PlanDraft) -> Result<Plan, CatalogError> {
        self.registry.record_plan(draft).await
    }

    async fn apply_observed_price(
        &self,
        plan_id: Uuid,
        new_price: Decimal,
    ) -> Result<Plan, CatalogError> {
        self.ledger.apply_observed_price(plan_id, new_price).await
    }

    async fn price_history(&self, plan_id: Uuid) -> Result<Vec<PriceChange>, CatalogError> {
        self.ledger.history_for_plan(plan_id).await
    }

    async fn create_community(&self, new: NewCommunity) -> Result<Community, CatalogError> {
        self.registry.create_community(new).await
    }

    async fn update_community(
        &self,
        id: Uuid,
        update: CommunityUpdate,
    ) -> Result<Community, CatalogError> {
        self.registry.update_community(id, update).await
    }

    async fn create_company(&self, new: NewCompany) -> Result<Company, CatalogError> {
        self.registry.create_company(new).await
    }

    async fn upsert_segment(
        &self,
        community_id: Uuid,
        name: &str,
        label: &str,
        active: bool,
        display_order: i32,
    ) -> Result<ProductSegment, CatalogError> {
        self.registry
            .upsert_segment(community_id, name, label, active, display_order)
            .await
    }

    async fn set_community_alias(
        &self,
        community_id: Uuid,
        company_id: Uuid,
        name_used_by_company: Option<String>,
    ) -> Result<(), CatalogError> {
        self.registry
            .set_community_alias(community_id, company_id, name_used_by_company)
            .await
    }

    async fn set_segment_alias(
        &self,
        segment_id: Uuid,
        company_id: Uuid,
        segment_label_as_company: Option<String>,
    ) -> Result<(), CatalogError> {
        self.registry
            .set_segment_alias(segment_id, company_id, segment_label_as_company)
            .await
    }

    async fn refresh_company_totals(&self, company_id: Uuid) -> Result<Company, CatalogError> {
        self.registry.refresh_company_totals(company_id).await
    }
}
