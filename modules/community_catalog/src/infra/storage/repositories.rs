//! SeaORM repository implementations

use crate::contract::{
    Community, CommunityCompanyLink, Company, Plan, PlanKind, PriceChange, ProductSegment,
    SegmentCompanyLink,
};
use crate::domain::repository::{
    AliasLinkRepository, CommunityRepository, CompanyRepository, PlanRepository,
    PriceHistoryRepository, SegmentRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, Func},
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use super::entity;
use super::mapper::kind_to_str;

// ===== Community Repository =====

pub struct SeaOrmCommunityRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCommunityRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommunityRepository for SeaOrmCommunityRepository {
    async fn insert(&self, community: &Community) -> Result<Community> {
        let active: entity::community::ActiveModel = community.into();
        let result = entity::community::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn update(&self, community: &Community) -> Result<Community> {
        let active: entity::community::ActiveModel = community.into();
        let result = entity::community::Entity::update(active)
            .exec(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Community>> {
        let result = entity::community::Entity::find_by_id(id)
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Community>> {
        // Whole-string, case-insensitive. Bound-parameter equality, so
        // metacharacters in caller text stay literal.
        let result = entity::community::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(entity::community::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }
}

// ===== Company Repository =====

pub struct SeaOrmCompanyRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn insert(&self, company: &Company) -> Result<Company> {
        let active: entity::company::ActiveModel = company.into();
        let result = entity::company::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>> {
        let result = entity::company::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(|e| e.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Company>> {
        let result = entity::company::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(entity::company::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }

    async fn set_totals(
        &self,
        company_id: Uuid,
        total_communities: i64,
        total_plans: i64,
    ) -> Result<()> {
        entity::company::Entity::update_many()
            .col_expr(
                entity::company::Column::TotalCommunities,
                Expr::value(total_communities),
            )
            .col_expr(entity::company::Column::TotalPlans, Expr::value(total_plans))
            .col_expr(entity::company::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::company::Column::Id.eq(company_id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }
}

// ===== Segment Repository =====

pub struct SeaOrmSegmentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSegmentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SegmentRepository for SeaOrmSegmentRepository {
    async fn upsert(&self, segment: &ProductSegment) -> Result<ProductSegment> {
        let existing = entity::segment::Entity::find_by_id(segment.id)
            .one(&*self.db)
            .await?;

        let active: entity::segment::ActiveModel = segment.into();
        let result = if existing.is_some() {
            entity::segment::Entity::update(active).exec(&*self.db).await?
        } else {
            entity::segment::Entity::insert(active)
                .exec_with_returning(&*self.db)
                .await?
        };
        Ok(result.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductSegment>> {
        let result = entity::segment::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(|e| e.into()))
    }

    async fn find_by_community_and_name(
        &self,
        community_id: Uuid,
        name: &str,
    ) -> Result<Option<ProductSegment>> {
        let result = entity::segment::Entity::find()
            .filter(entity::segment::Column::CommunityId.eq(community_id))
            .filter(
                Expr::expr(Func::lower(Expr::col(entity::segment::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }
}

// ===== Alias Link Repository =====

pub struct SeaOrmAliasLinkRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmAliasLinkRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AliasLinkRepository for SeaOrmAliasLinkRepository {
    async fn upsert_community_link(
        &self,
        link: &CommunityCompanyLink,
    ) -> Result<CommunityCompanyLink> {
        let existing = entity::community_company::Entity::find_by_id((
            link.community_id,
            link.company_id,
        ))
        .one(&*self.db)
        .await?;

        let result = if let Some(existing) = existing {
            use sea_orm::ActiveValue::Set;
            let mut active: entity::community_company::ActiveModel = link.into();
            active.created_at = Set(existing.created_at);
            active.updated_at = Set(Utc::now());
            entity::community_company::Entity::update(active)
                .exec(&*self.db)
                .await?
        } else {
            let active: entity::community_company::ActiveModel = link.into();
            entity::community_company::Entity::insert(active)
                .exec_with_returning(&*self.db)
                .await?
        };
        Ok(result.into())
    }

    async fn find_community_link(
        &self,
        community_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<CommunityCompanyLink>> {
        let result =
            entity::community_company::Entity::find_by_id((community_id, company_id))
                .one(&*self.db)
                .await?;
        Ok(result.map(|e| e.into()))
    }

    async fn upsert_segment_link(&self, link: &SegmentCompanyLink) -> Result<SegmentCompanyLink> {
        let existing =
            entity::segment_company::Entity::find_by_id((link.segment_id, link.company_id))
                .one(&*self.db)
                .await?;

        let result = if let Some(existing) = existing {
            use sea_orm::ActiveValue::Set;
            let mut active: entity::segment_company::ActiveModel = link.into();
            active.created_at = Set(existing.created_at);
            active.updated_at = Set(Utc::now());
            entity::segment_company::Entity::update(active)
                .exec(&*self.db)
                .await?
        } else {
            let active: entity::segment_company::ActiveModel = link.into();
            entity::segment_company::Entity::insert(active)
                .exec_with_returning(&*self.db)
                .await?
        };
        Ok(result.into())
    }

    async fn find_segment_link(
        &self,
        segment_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<SegmentCompanyLink>> {
        let result = entity::segment_company::Entity::find_by_id((segment_id, company_id))
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }

    async fn count_communities_for_company(&self, company_id: Uuid) -> Result<i64> {
        let count = entity::community_company::Entity::find()
            .filter(entity::community_company::Column::CompanyId.eq(company_id))
            .count(&*self.db)
            .await?;
        Ok(count as i64)
    }
}

// ===== Plan Repository =====

pub struct SeaOrmPlanRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPlanRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanRepository for SeaOrmPlanRepository {
    async fn insert(&self, plan: &Plan) -> Result<Plan> {
        let active: entity::plan::ActiveModel = plan.into();
        let result = entity::plan::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn update(&self, plan: &Plan) -> Result<Plan> {
        let active: entity::plan::ActiveModel = plan.into();
        let result = entity::plan::Entity::update(active).exec(&*self.db).await?;
        Ok(result.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>> {
        let result = entity::plan::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(|e| e.into()))
    }

    async fn find_by_natural_key(
        &self,
        name: &str,
        company_name: &str,
        community_name: &str,
        kind: PlanKind,
    ) -> Result<Option<Plan>> {
        let result = entity::plan::Entity::find()
            .filter(entity::plan::Column::Name.eq(name))
            .filter(entity::plan::Column::CompanyName.eq(company_name))
            .filter(entity::plan::Column::CommunityName.eq(community_name))
            .filter(entity::plan::Column::Kind.eq(kind_to_str(kind)))
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }

    async fn find_complete_by_community(&self, community_id: Uuid) -> Result<Vec<Plan>> {
        let results = entity::plan::Entity::find()
            .filter(entity::plan::Column::CommunityId.eq(community_id))
            .filter(entity::plan::Column::Name.is_not_null())
            .filter(entity::plan::Column::Price.is_not_null())
            .filter(entity::plan::Column::CompanyName.is_not_null())
            .filter(entity::plan::Column::CommunityName.is_not_null())
            .order_by_desc(entity::plan::Column::LastUpdated)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn set_price(&self, plan_id: Uuid, price: Decimal, at: DateTime<Utc>) -> Result<()> {
        entity::plan::Entity::update_many()
            .col_expr(entity::plan::Column::Price, Expr::value(price))
            .col_expr(entity::plan::Column::LastUpdated, Expr::value(at))
            .filter(entity::plan::Column::Id.eq(plan_id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn count_for_company(&self, company_id: Uuid) -> Result<i64> {
        let count = entity::plan::Entity::find()
            .filter(entity::plan::Column::CompanyId.eq(company_id))
            .count(&*self.db)
            .await?;
        Ok(count as i64)
    }
}

// ===== Price History Repository =====

pub struct SeaOrmPriceHistoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPriceHistoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PriceHistoryRepository for SeaOrmPriceHistoryRepository {
    async fn append(&self, change: &PriceChange) -> Result<PriceChange> {
        let active: entity::price_change::ActiveModel = change.into();
        let result = entity::price_change::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn changed_since(
        &self,
        plan_ids: &[Uuid],
        cutoff: DateTime<Utc>,
    ) -> Result<HashSet<Uuid>> {
        // Indexed range scan on (plan_id, changed_at); cost tracks the
        // in-window event count, not total history.
        let rows: Vec<Uuid> = entity::price_change::Entity::find()
            .select_only()
            .column(entity::price_change::Column::PlanId)
            .distinct()
            .filter(entity::price_change::Column::PlanId.is_in(plan_ids.iter().copied()))
            .filter(entity::price_change::Column::ChangedAt.gte(cutoff))
            .into_tuple()
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().collect())
    }

    async fn list_for_plan(&self, plan_id: Uuid) -> Result<Vec<PriceChange>> {
        let results = entity::price_change::Entity::find()
            .filter(entity::price_change::Column::PlanId.eq(plan_id))
            .order_by_desc(entity::price_change::Column::ChangedAt)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }
}
