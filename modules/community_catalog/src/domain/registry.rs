//! Canonical registry - write side for communities, companies, segments,
//! alias links and plan ingestion

use super::ident::non_empty_trimmed;
use super::ledger::PriceLedger;
use super::repository::{
    AliasLinkRepository, CommunityRepository, CompanyRepository, PlanRepository, SegmentRepository,
};
use crate::contract::{
    CatalogError, Community, CommunityCompanyLink, CommunityUpdate, Company, NewCommunity,
    NewCompany, Plan, PlanCommunityRef, PlanCompanyRef, PlanDraft, ProductSegment,
    SegmentCompanyLink,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Domain service for registry writes.
pub struct Registry {
    communities: Arc<dyn CommunityRepository>,
    companies: Arc<dyn CompanyRepository>,
    segments: Arc<dyn SegmentRepository>,
    links: Arc<dyn AliasLinkRepository>,
    plans: Arc<dyn PlanRepository>,
    ledger: Arc<PriceLedger>,
}

impl Registry {
    /// Create a new registry instance
    pub fn new(
        communities: Arc<dyn CommunityRepository>,
        companies: Arc<dyn CompanyRepository>,
        segments: Arc<dyn SegmentRepository>,
        links: Arc<dyn AliasLinkRepository>,
        plans: Arc<dyn PlanRepository>,
        ledger: Arc<PriceLedger>,
    ) -> Self {
        Self {
            communities,
            companies,
            segments,
            links,
            plans,
            ledger,
        }
    }

    // ===== Community Operations =====

    /// Create a canonical community
    pub async fn create_community(&self, new: NewCommunity) -> Result<Community, CatalogError> {
        let name = non_empty_trimmed(Some(&new.name))
            .ok_or_else(|| CatalogError::validation("community name must be non-empty"))?
            .to_string();

        if let Some(parent_id) = new.parent_id {
            self.require_community(parent_id).await?;
        }

        let now = Utc::now();
        let community = Community {
            id: Uuid::new_v4(),
            name,
            parent_id: new.parent_id,
            description: new.description,
            location: new.location,
            created_at: now,
            updated_at: now,
        };
        Ok(self.communities.insert(&community).await?)
    }

    /// Partially update a community.
    ///
    /// Rejects assigning a community as its own parent. Longer cycles
    /// through intermediates are not detected.
    pub async fn update_community(
        &self,
        id: Uuid,
        update: CommunityUpdate,
    ) -> Result<Community, CatalogError> {
        let mut community = self.require_community(id).await?;

        if let Some(name) = update.name {
            community.name = non_empty_trimmed(Some(&name))
                .ok_or_else(|| CatalogError::validation("community name must be non-empty"))?
                .to_string();
        }
        if let Some(parent_id) = update.parent_id {
            if parent_id == Some(id) {
                return Err(CatalogError::validation(
                    "community cannot be its own parent",
                ));
            }
            if let Some(parent_id) = parent_id {
                self.require_community(parent_id).await?;
            }
            community.parent_id = parent_id;
        }
        if let Some(description) = update.description {
            community.description = Some(description);
        }
        if let Some(location) = update.location {
            community.location = Some(location);
        }
        community.updated_at = Utc::now();

        Ok(self.communities.update(&community).await?)
    }

    // ===== Company Operations =====

    /// Create a canonical company with a globally unique name
    pub async fn create_company(&self, new: NewCompany) -> Result<Company, CatalogError> {
        let name = non_empty_trimmed(Some(&new.name))
            .ok_or_else(|| CatalogError::validation("company name must be non-empty"))?
            .to_string();

        if self.companies.find_by_name(&name).await?.is_some() {
            return Err(CatalogError::conflict(format!(
                "company name already exists: {name}"
            )));
        }

        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4(),
            name,
            slug: new.slug,
            website: new.website,
            total_communities: 0,
            total_plans: 0,
            created_at: now,
            updated_at: now,
        };
        Ok(self.companies.insert(&company).await?)
    }

    /// Recompute the denormalized counters for a company. The counters are
    /// eventually-consistent summaries, not authoritative.
    pub async fn refresh_company_totals(&self, company_id: Uuid) -> Result<Company, CatalogError> {
        self.require_company(company_id).await?;

        let total_communities = self.links.count_communities_for_company(company_id).await?;
        let total_plans = self.plans.count_for_company(company_id).await?;
        self.companies
            .set_totals(company_id, total_communities, total_plans)
            .await?;

        self.require_company(company_id).await
    }

    // ===== Segment Operations =====

    /// Create or update a product segment, unique by name per community
    pub async fn upsert_segment(
        &self,
        community_id: Uuid,
        name: &str,
        label: &str,
        active: bool,
        display_order: i32,
    ) -> Result<ProductSegment, CatalogError> {
        let name = non_empty_trimmed(Some(name))
            .ok_or_else(|| CatalogError::validation("segment name must be non-empty"))?;
        self.require_community(community_id).await?;

        let now = Utc::now();
        let existing = self
            .segments
            .find_by_community_and_name(community_id, name)
            .await?;

        let segment = match existing {
            Some(mut segment) => {
                segment.label = label.to_string();
                segment.active = active;
                segment.display_order = display_order;
                segment.updated_at = now;
                segment
            }
            None => ProductSegment {
                id: Uuid::new_v4(),
                community_id,
                name: name.to_string(),
                label: label.to_string(),
                active,
                display_order,
                created_at: now,
                updated_at: now,
            },
        };
        Ok(self.segments.upsert(&segment).await?)
    }

    // ===== Alias Links =====

    /// Set or clear the community name used by one company's source
    pub async fn set_community_alias(
        &self,
        community_id: Uuid,
        company_id: Uuid,
        name_used_by_company: Option<String>,
    ) -> Result<(), CatalogError> {
        self.require_community(community_id).await?;
        self.require_company(company_id).await?;

        let now = Utc::now();
        let link = CommunityCompanyLink {
            community_id,
            company_id,
            name_used_by_company,
            created_at: now,
            updated_at: now,
        };
        self.links.upsert_community_link(&link).await?;
        Ok(())
    }

    /// Set or clear the segment label used by one company's source
    pub async fn set_segment_alias(
        &self,
        segment_id: Uuid,
        company_id: Uuid,
        segment_label_as_company: Option<String>,
    ) -> Result<(), CatalogError> {
        self.segments
            .find_by_id(segment_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("segment", segment_id.to_string()))?;
        self.require_company(company_id).await?;

        let now = Utc::now();
        let link = SegmentCompanyLink {
            segment_id,
            company_id,
            segment_label_as_company,
            created_at: now,
            updated_at: now,
        };
        self.links.upsert_segment_link(&link).await?;
        Ok(())
    }

    // ===== Plan Ingestion =====

    /// Upsert a plan by its natural key: (name, company name, community
    /// name, kind). The embedded name snapshots form the key because the
    /// upstream source identifies plans by name, not id.
    ///
    /// When the upsert changes an existing plan's price, the ledger event is
    /// appended before the plan row is rewritten.
    pub async fn record_plan(&self, draft: PlanDraft) -> Result<Plan, CatalogError> {
        let name = non_empty_trimmed(Some(&draft.name))
            .ok_or_else(|| CatalogError::validation("plan name must be non-empty"))?
            .to_string();
        let company_name = non_empty_trimmed(draft.company.name.as_deref())
            .ok_or_else(|| CatalogError::validation("plan company name must be non-empty"))?
            .to_string();
        let community_name = non_empty_trimmed(draft.community.name.as_deref())
            .ok_or_else(|| CatalogError::validation("plan community name must be non-empty"))?
            .to_string();

        let now = Utc::now();
        let existing = self
            .plans
            .find_by_natural_key(&name, &company_name, &community_name, draft.kind)
            .await?;

        match existing {
            Some(mut plan) => {
                if let (Some(old), Some(new)) = (plan.price, draft.price) {
                    if old != new {
                        self.ledger
                            .record_change(plan.id, Some(old), new, now)
                            .await?;
                    }
                }
                if draft.price.is_some() {
                    plan.price = draft.price;
                }
                plan.sqft = draft.sqft.or(plan.sqft);
                plan.stories = draft.stories.or(plan.stories);
                plan.beds = draft.beds.or(plan.beds);
                plan.baths = draft.baths.or(plan.baths);
                plan.address = draft.address.or(plan.address);
                // Refresh the embedded references; the name snapshots that
                // form the key stay as matched.
                plan.company.id = draft.company.id.or(plan.company.id);
                plan.community.id = draft.community.id.or(plan.community.id);
                plan.community.location = draft.community.location.or(plan.community.location);
                plan.last_updated = now;
                Ok(self.plans.update(&plan).await?)
            }
            None => {
                let plan = Plan {
                    id: Uuid::new_v4(),
                    name: Some(name),
                    price: draft.price,
                    sqft: draft.sqft,
                    stories: draft.stories,
                    beds: draft.beds,
                    baths: draft.baths,
                    address: draft.address,
                    kind: draft.kind,
                    company: PlanCompanyRef {
                        id: draft.company.id,
                        name: Some(company_name),
                    },
                    community: PlanCommunityRef {
                        id: draft.community.id,
                        name: Some(community_name),
                        location: draft.community.location,
                    },
                    last_updated: now,
                };
                Ok(self.plans.insert(&plan).await?)
            }
        }
    }

    // ===== Helper Methods =====

    async fn require_community(&self, id: Uuid) -> Result<Community, CatalogError> {
        self.communities
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("community", id.to_string()))
    }

    async fn require_company(&self, id: Uuid) -> Result<Company, CatalogError> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("company", id.to_string()))
    }
}
