//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::model::{
    Community, CommunityCompanyLink, Company, Plan, PlanKind, PriceChange, ProductSegment,
    SegmentCompanyLink,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;
use uuid::Uuid;

/// Repository for canonical communities
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Insert a new community
    async fn insert(&self, community: &Community) -> Result<Community>;

    /// Replace an existing community
    async fn update(&self, community: &Community) -> Result<Community>;

    /// Find a community by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Community>>;

    /// Find a community by canonical name, case-insensitive whole-string
    async fn find_by_name(&self, name: &str) -> Result<Option<Community>>;
}

/// Repository for canonical companies
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert a new company
    async fn insert(&self, company: &Company) -> Result<Company>;

    /// Find a company by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>>;

    /// Find a company by name, case-insensitive whole-string
    async fn find_by_name(&self, name: &str) -> Result<Option<Company>>;

    /// Overwrite the denormalized community/plan counters
    async fn set_totals(
        &self,
        company_id: Uuid,
        total_communities: i64,
        total_plans: i64,
    ) -> Result<()>;
}

/// Repository for product segments
#[async_trait]
pub trait SegmentRepository: Send + Sync {
    /// Insert or replace a segment
    async fn upsert(&self, segment: &ProductSegment) -> Result<ProductSegment>;

    /// Find a segment by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductSegment>>;

    /// Find a segment by its per-community unique name
    async fn find_by_community_and_name(
        &self,
        community_id: Uuid,
        name: &str,
    ) -> Result<Option<ProductSegment>>;
}

/// Repository for alias links (community-company and segment-company)
#[async_trait]
pub trait AliasLinkRepository: Send + Sync {
    /// Insert or replace the link for a (community, company) pair
    async fn upsert_community_link(
        &self,
        link: &CommunityCompanyLink,
    ) -> Result<CommunityCompanyLink>;

    /// Find the link for a (community, company) pair
    async fn find_community_link(
        &self,
        community_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<CommunityCompanyLink>>;

    /// Insert or replace the link for a (segment, company) pair
    async fn upsert_segment_link(&self, link: &SegmentCompanyLink) -> Result<SegmentCompanyLink>;

    /// Find the link for a (segment, company) pair
    async fn find_segment_link(
        &self,
        segment_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<SegmentCompanyLink>>;

    /// Count communities linked to a company
    async fn count_communities_for_company(&self, company_id: Uuid) -> Result<i64>;
}

/// Repository for plans
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Insert a new plan
    async fn insert(&self, plan: &Plan) -> Result<Plan>;

    /// Replace an existing plan
    async fn update(&self, plan: &Plan) -> Result<Plan>;

    /// Find a plan by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>>;

    /// Find a plan by its natural key: embedded name snapshots plus kind
    async fn find_by_natural_key(
        &self,
        name: &str,
        company_name: &str,
        community_name: &str,
        kind: PlanKind,
    ) -> Result<Option<Plan>>;

    /// Plans scoped to a community with all display fields present,
    /// ordered by last_updated descending
    async fn find_complete_by_community(&self, community_id: Uuid) -> Result<Vec<Plan>>;

    /// Overwrite a plan's stored price and bump its last_updated timestamp
    async fn set_price(&self, plan_id: Uuid, price: Decimal, at: DateTime<Utc>) -> Result<()>;

    /// Count plans referencing a company
    async fn count_for_company(&self, company_id: Uuid) -> Result<i64>;
}

/// Repository for the append-only price-change log
#[async_trait]
pub trait PriceHistoryRepository: Send + Sync {
    /// Append one immutable event
    async fn append(&self, change: &PriceChange) -> Result<PriceChange>;

    /// Among the candidates, the plan ids with at least one event at or
    /// after the cutoff. Backed by an index on (plan_id, changed_at).
    async fn changed_since(
        &self,
        plan_ids: &[Uuid],
        cutoff: DateTime<Utc>,
    ) -> Result<HashSet<Uuid>>;

    /// All events for a plan, newest first
    async fn list_for_plan(&self, plan_id: Uuid) -> Result<Vec<PriceChange>>;
}
