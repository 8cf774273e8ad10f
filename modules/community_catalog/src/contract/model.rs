//! Contract models for the community catalog
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Canonical record for a physical development.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Community {
    pub id: Uuid,
    /// Canonical display name. Not guaranteed unique across case.
    pub name: String,
    /// Optional parent community, forming a tree.
    pub parent_id: Option<Uuid>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a community.
#[derive(Debug, Clone, Default)]
pub struct NewCommunity {
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Partial update for a community. `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct CommunityUpdate {
    pub name: Option<String>,
    /// `Some(None)` clears the parent, `Some(Some(id))` reassigns it.
    pub parent_id: Option<Option<Uuid>>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Canonical record for a builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: Uuid,
    /// Globally unique name (case-insensitive).
    pub name: String,
    pub slug: Option<String>,
    pub website: Option<String>,
    /// Eventually-consistent summary, not authoritative.
    pub total_communities: i64,
    /// Eventually-consistent summary, not authoritative.
    pub total_plans: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a company.
#[derive(Debug, Clone, Default)]
pub struct NewCompany {
    pub name: String,
    pub slug: Option<String>,
    pub website: Option<String>,
}

/// A named sub-line of a company's offerings within one community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSegment {
    pub id: Uuid,
    pub community_id: Uuid,
    /// Unique per community.
    pub name: String,
    /// Display string shown for this segment.
    pub label: String,
    pub active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Alias link between a community and a company.
///
/// `name_used_by_company` overrides the canonical community name when
/// interacting with this company's source material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityCompanyLink {
    pub community_id: Uuid,
    pub company_id: Uuid,
    pub name_used_by_company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Alias link between a product segment and a company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentCompanyLink {
    pub segment_id: Uuid,
    pub company_id: Uuid,
    pub segment_label_as_company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Discriminator between floor plans and spec-home ("now") listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanKind {
    Plan,
    Now,
}

/// Company reference embedded in a plan, captured at write time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanCompanyRef {
    pub id: Option<Uuid>,
    pub name: Option<String>,
}

/// Community reference embedded in a plan, captured at write time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanCommunityRef {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub location: Option<String>,
}

/// A floor-plan or spec-home listing.
///
/// The natural key is (name, company.name, community.name, kind) - the
/// embedded name snapshots, not ids, because the upstream source identifies
/// plans by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub id: Uuid,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub sqft: Option<i32>,
    pub stories: Option<i32>,
    pub beds: Option<i32>,
    pub baths: Option<Decimal>,
    pub address: Option<String>,
    pub kind: PlanKind,
    pub company: PlanCompanyRef,
    pub community: PlanCommunityRef,
    pub last_updated: DateTime<Utc>,
}

/// Incoming plan data from the ingestion collaborator.
///
/// The four natural-key fields are mandatory; everything else is whatever
/// the source happened to expose.
#[derive(Debug, Clone)]
pub struct PlanDraft {
    pub name: String,
    pub kind: PlanKind,
    pub company: PlanCompanyRef,
    pub community: PlanCommunityRef,
    pub price: Option<Decimal>,
    pub sqft: Option<i32>,
    pub stories: Option<i32>,
    pub beds: Option<i32>,
    pub baths: Option<Decimal>,
    pub address: Option<String>,
}

/// Immutable price-change event for a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceChange {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub old_price: Option<Decimal>,
    pub new_price: Decimal,
    pub changed_at: DateTime<Utc>,
}

/// Loose identifying input for entity resolution.
///
/// Ids and names arrive from heterogeneous callers and may be malformed;
/// a malformed id falls through to name matching instead of erroring.
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    pub community_id: Option<String>,
    pub community_name: Option<String>,
    pub company_id: Option<String>,
    pub company_name: Option<String>,
    pub segment_id: Option<String>,
}

/// Resolved segment context, present only when a valid segment id was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSegment {
    pub id: Uuid,
    /// The segment's own display label.
    pub label: String,
    /// Label to present to this company's source, after alias resolution.
    pub label_for_scrape: String,
}

/// Canonical identification produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntities {
    pub community_id: Uuid,
    pub company_id: Uuid,
    pub community_name: String,
    pub company_name: String,
    /// Name to present to this company's source for this community.
    pub community_name_for_scrape: String,
    pub segment: Option<ResolvedSegment>,
}

/// Externally visible plan record with recency annotation.
///
/// Carries both flat name strings (older consumers) and the nested
/// references (newer consumers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanView {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub sqft: Option<i32>,
    pub stories: Option<i32>,
    pub beds: Option<i32>,
    pub baths: Option<Decimal>,
    pub address: Option<String>,
    pub kind: PlanKind,
    pub company_name: String,
    pub community_name: String,
    pub company: PlanCompanyRef,
    pub community: PlanCommunityRef,
    /// True iff the price ledger holds an event for this plan inside the
    /// requested window.
    pub price_changed_recently: bool,
    pub last_updated: DateTime<Utc>,
}
