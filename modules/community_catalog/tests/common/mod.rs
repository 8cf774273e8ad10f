//! Common test utilities: in-memory mock repositories and a wired fixture

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use community_catalog::contract::*;
use community_catalog::domain::{
    AliasLinkRepository, CommunityRepository, CompanyRepository, PlanProjector, PlanRepository,
    PriceHistoryRepository, PriceLedger, Registry, Resolver, SegmentRepository,
};

// ===== Mock Repositories =====

#[derive(Clone, Default)]
pub struct MockCommunityRepo {
    data: Arc<RwLock<HashMap<Uuid, Community>>>,
}

#[async_trait]
impl CommunityRepository for MockCommunityRepo {
    async fn insert(&self, community: &Community) -> anyhow::Result<Community> {
        self.data.write().insert(community.id, community.clone());
        Ok(community.clone())
    }

    async fn update(&self, community: &Community) -> anyhow::Result<Community> {
        self.data.write().insert(community.id, community.clone());
        Ok(community.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Community>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Community>> {
        let needle = name.to_lowercase();
        Ok(self
            .data
            .read()
            .values()
            .find(|c| c.name.to_lowercase() == needle)
            .cloned())
    }
}

#[derive(Clone, Default)]
pub struct MockCompanyRepo {
    data: Arc<RwLock<HashMap<Uuid, Company>>>,
}

#[async_trait]
impl CompanyRepository for MockCompanyRepo {
    async fn insert(&self, company: &Company) -> anyhow::Result<Company> {
        self.data.write().insert(company.id, company.clone());
        Ok(company.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Company>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Company>> {
        let needle = name.to_lowercase();
        Ok(self
            .data
            .read()
            .values()
            .find(|c| c.name.to_lowercase() == needle)
            .cloned())
    }

    async fn set_totals(
        &self,
        company_id: Uuid,
        total_communities: i64,
        total_plans: i64,
    ) -> anyhow::Result<()> {
        if let Some(company) = self.data.write().get_mut(&company_id) {
            company.total_communities = total_communities;
            company.total_plans = total_plans;
            company.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockSegmentRepo {
    data: Arc<RwLock<HashMap<Uuid, ProductSegment>>>,
}

#[async_trait]
impl SegmentRepository for MockSegmentRepo {
    async fn upsert(&self, segment: &ProductSegment) -> anyhow::Result<ProductSegment> {
        self.data.write().insert(segment.id, segment.clone());
        Ok(segment.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<ProductSegment>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn find_by_community_and_name(
        &self,
        community_id: Uuid,
        name: &str,
    ) -> anyhow::Result<Option<ProductSegment>> {
        let needle = name.to_lowercase();
        Ok(self
            .data
            .read()
            .values()
            .find(|s| s.community_id == community_id && s.name.to_lowercase() == needle)
            .cloned())
    }
}

#[derive(Clone, Default)]
pub struct MockAliasLinkRepo {
    community_links: Arc<RwLock<HashMap<(Uuid, Uuid), CommunityCompanyLink>>>,
    segment_links: Arc<RwLock<HashMap<(Uuid, Uuid), SegmentCompanyLink>>>,
}

#[async_trait]
impl AliasLinkRepository for MockAliasLinkRepo {
    async fn upsert_community_link(
        &self,
        link: &CommunityCompanyLink,
    ) -> anyhow::Result<CommunityCompanyLink> {
        self.community_links
            .write()
            .insert((link.community_id, link.company_id), link.clone());
        Ok(link.clone())
    }

    async fn find_community_link(
        &self,
        community_id: Uuid,
        company_id: Uuid,
    ) -> anyhow::Result<Option<CommunityCompanyLink>> {
        Ok(self
            .community_links
            .read()
            .get(&(community_id, company_id))
            .cloned())
    }

    async fn upsert_segment_link(
        &self,
        link: &SegmentCompanyLink,
    ) -> anyhow::Result<SegmentCompanyLink> {
        self.segment_links
            .write()
            .insert((link.segment_id, link.company_id), link.clone());
        Ok(link.clone())
    }

    async fn find_segment_link(
        &self,
        segment_id: Uuid,
        company_id: Uuid,
    ) -> anyhow::Result<Option<SegmentCompanyLink>> {
        Ok(self
            .segment_links
            .read()
            .get(&(segment_id, company_id))
            .cloned())
    }

    async fn count_communities_for_company(&self, company_id: Uuid) -> anyhow::Result<i64> {
        Ok(self
            .community_links
            .read()
            .keys()
            .filter(|(_, cid)| *cid == company_id)
            .count() as i64)
    }
}

#[derive(Clone, Default)]
pub struct MockPlanRepo {
    data: Arc<RwLock<HashMap<Uuid, Plan>>>,
}

#[async_trait]
impl PlanRepository for MockPlanRepo {
    async fn insert(&self, plan: &Plan) -> anyhow::Result<Plan> {
        self.data.write().insert(plan.id, plan.clone());
        Ok(plan.clone())
    }

    async fn update(&self, plan: &Plan) -> anyhow::Result<Plan> {
        self.data.write().insert(plan.id, plan.clone());
        Ok(plan.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Plan>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn find_by_natural_key(
        &self,
        name: &str,
        company_name: &str,
        community_name: &str,
        kind: PlanKind,
    ) -> anyhow::Result<Option<Plan>> {
        Ok(self
            .data
            .read()
            .values()
            .find(|p| {
                p.name.as_deref() == Some(name)
                    && p.company.name.as_deref() == Some(company_name)
                    && p.community.name.as_deref() == Some(community_name)
                    && p.kind == kind
            })
            .cloned())
    }

    async fn find_complete_by_community(&self, community_id: Uuid) -> anyhow::Result<Vec<Plan>> {
        let mut plans: Vec<Plan> = self
            .data
            .read()
            .values()
            .filter(|p| {
                p.community.id == Some(community_id)
                    && p.name.is_some()
                    && p.price.is_some()
                    && p.company.name.is_some()
                    && p.community.name.is_some()
            })
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(plans)
    }

    async fn set_price(
        &self,
        plan_id: Uuid,
        price: Decimal,
        at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        if let Some(plan) = self.data.write().get_mut(&plan_id) {
            plan.price = Some(price);
            plan.last_updated = at;
        }
        Ok(())
    }

    async fn count_for_company(&self, company_id: Uuid) -> anyhow::Result<i64> {
        Ok(self
            .data
            .read()
            .values()
            .filter(|p| p.company.id == Some(company_id))
            .count() as i64)
    }
}

#[derive(Clone, Default)]
pub struct MockPriceHistoryRepo {
    data: Arc<RwLock<Vec<PriceChange>>>,
}

impl MockPriceHistoryRepo {
    pub fn event_count(&self) -> usize {
        self.data.read().len()
    }
}

#[async_trait]
impl PriceHistoryRepository for MockPriceHistoryRepo {
    async fn append(&self, change: &PriceChange) -> anyhow::Result<PriceChange> {
        self.data.write().push(change.clone());
        Ok(change.clone())
    }

    async fn changed_since(
        &self,
        plan_ids: &[Uuid],
        cutoff: DateTime<Utc>,
    ) -> anyhow::Result<HashSet<Uuid>> {
        Ok(self
            .data
            .read()
            .iter()
            .filter(|c| plan_ids.contains(&c.plan_id) && c.changed_at >= cutoff)
            .map(|c| c.plan_id)
            .collect())
    }

    async fn list_for_plan(&self, plan_id: Uuid) -> anyhow::Result<Vec<PriceChange>> {
        let mut changes: Vec<PriceChange> = self
            .data
            .read()
            .iter()
            .filter(|c| c.plan_id == plan_id)
            .cloned()
            .collect();
        changes.sort_by(|a, b| b.changed_at.cmp(&a.changed_at));
        Ok(changes)
    }
}

// ===== Fixture =====

/// Fully wired catalog over in-memory repositories.
pub struct TestCatalog {
    pub communities: Arc<MockCommunityRepo>,
    pub companies: Arc<MockCompanyRepo>,
    pub segments: Arc<MockSegmentRepo>,
    pub links: Arc<MockAliasLinkRepo>,
    pub plans: Arc<MockPlanRepo>,
    pub history: Arc<MockPriceHistoryRepo>,
    pub resolver: Resolver,
    pub ledger: Arc<PriceLedger>,
    pub projector: PlanProjector,
    pub registry: Registry,
}

impl TestCatalog {
    pub fn new() -> Self {
        let communities = Arc::new(MockCommunityRepo::default());
        let companies = Arc::new(MockCompanyRepo::default());
        let segments = Arc::new(MockSegmentRepo::default());
        let links = Arc::new(MockAliasLinkRepo::default());
        let plans = Arc::new(MockPlanRepo::default());
        let history = Arc::new(MockPriceHistoryRepo::default());

        let resolver = Resolver::new(
            communities.clone(),
            companies.clone(),
            segments.clone(),
            links.clone(),
        );
        let ledger = Arc::new(PriceLedger::new(history.clone(), plans.clone()));
        let projector = PlanProjector::new(
            communities.clone(),
            plans.clone(),
            ledger.clone(),
            Duration::hours(24),
        );
        let registry = Registry::new(
            communities.clone(),
            companies.clone(),
            segments.clone(),
            links.clone(),
            plans.clone(),
            ledger.clone(),
        );

        Self {
            communities,
            companies,
            segments,
            links,
            plans,
            history,
            resolver,
            ledger,
            projector,
            registry,
        }
    }

    /// Seed a canonical community through the registry.
    pub async fn seed_community(&self, name: &str) -> Community {
        self.registry
            .create_community(NewCommunity {
                name: name.to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    /// Seed a canonical company through the registry.
    pub async fn seed_company(&self, name: &str) -> Company {
        self.registry
            .create_company(NewCompany {
                name: name.to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    /// Seed a displayable plan for a community/company pair.
    pub async fn seed_plan(
        &self,
        name: &str,
        community: &Community,
        company: &Company,
        price: Decimal,
    ) -> Plan {
        self.registry
            .record_plan(PlanDraft {
                name: name.to_string(),
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
                price: Some(price),
                sqft: None,
                stories: None,
                beds: None,
                baths: None,
                address: None,
            })
            .await
            .unwrap()
    }
}

impl Default for TestCatalog {
    fn default() -> Self {
        Self::new()
    }
}
