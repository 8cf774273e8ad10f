//! Entity resolver - canonical identification for loose cross-source input
//!
//! An ingestion job calls `resolve` before fetching or writing data, to learn
//! the exact name string to use against a company's source and the canonical
//! ids to attach to anything it persists.

use super::ident::{non_empty_trimmed, parse_loose_id};
use super::repository::{
    AliasLinkRepository, CommunityRepository, CompanyRepository, SegmentRepository,
};
use crate::contract::{
    CatalogError, Community, Company, ResolveRequest, ResolvedEntities, ResolvedSegment,
};
use std::sync::Arc;
use uuid::Uuid;

/// Domain service resolving loose (id and/or name) references to canonical
/// community/company/segment records plus the per-company display names.
pub struct Resolver {
    communities: Arc<dyn CommunityRepository>,
    companies: Arc<dyn CompanyRepository>,
    segments: Arc<dyn SegmentRepository>,
    links: Arc<dyn AliasLinkRepository>,
}

impl Resolver {
    /// Create a new resolver instance
    pub fn new(
        communities: Arc<dyn CommunityRepository>,
        companies: Arc<dyn CompanyRepository>,
        segments: Arc<dyn SegmentRepository>,
        links: Arc<dyn AliasLinkRepository>,
    ) -> Self {
        Self {
            communities,
            companies,
            segments,
            links,
        }
    }

    /// Resolve a request to canonical entities.
    ///
    /// Community and company resolution are both mandatory and fail-fast:
    /// community first, then company, then alias lookup. On any failure the
    /// whole call returns `NotFound` with no partial data. Segment context
    /// is optional and silently skipped when invalid or missing.
    pub async fn resolve(
        &self,
        request: &ResolveRequest,
    ) -> Result<ResolvedEntities, CatalogError> {
        let community = self.resolve_community(request).await?;
        let company = self.resolve_company(request).await?;

        let community_name_for_scrape = self
            .community_name_for_scrape(&community, company.id)
            .await?;

        let segment = self.resolve_segment(request, company.id).await?;

        Ok(ResolvedEntities {
            community_id: community.id,
            company_id: company.id,
            community_name: community.name,
            company_name: company.name,
            community_name_for_scrape,
            segment,
        })
    }

    async fn resolve_community(
        &self,
        request: &ResolveRequest,
    ) -> Result<Community, CatalogError> {
        // A syntactically valid id wins; name input is ignored once id
        // resolution succeeds.
        if let Some(id) = parse_loose_id(request.community_id.as_deref()) {
            if let Some(community) = self.communities.find_by_id(id).await? {
                return Ok(community);
            }
        }

        if let Some(name) = non_empty_trimmed(request.community_name.as_deref()) {
            if let Some(community) = self.communities.find_by_name(name).await? {
                return Ok(community);
            }
        }

        Err(CatalogError::not_found(
            "community",
            describe_reference(
                request.community_id.as_deref(),
                request.community_name.as_deref(),
            ),
        ))
    }

    async fn resolve_company(&self, request: &ResolveRequest) -> Result<Company, CatalogError> {
        if let Some(id) = parse_loose_id(request.company_id.as_deref()) {
            if let Some(company) = self.companies.find_by_id(id).await? {
                return Ok(company);
            }
        }

        if let Some(name) = non_empty_trimmed(request.company_name.as_deref()) {
            if let Some(company) = self.companies.find_by_name(name).await? {
                return Ok(company);
            }
        }

        Err(CatalogError::not_found(
            "company",
            describe_reference(
                request.company_id.as_deref(),
                request.company_name.as_deref(),
            ),
        ))
    }

    /// The name to present to this company's source for this community:
    /// a non-empty trimmed alias override wins, else the canonical name.
    async fn community_name_for_scrape(
        &self,
        community: &Community,
        company_id: Uuid,
    ) -> Result<String, CatalogError> {
        let link = self
            .links
            .find_community_link(community.id, company_id)
            .await?;

        let override_name = link
            .as_ref()
            .and_then(|l| non_empty_trimmed(l.name_used_by_company.as_deref()));

        Ok(override_name
            .map(str::to_string)
            .unwrap_or_else(|| community.name.clone()))
    }

    /// Optional segment context. Invalid or unknown segment ids are skipped,
    /// never an error - callers may omit segment context freely.
    async fn resolve_segment(
        &self,
        request: &ResolveRequest,
        company_id: Uuid,
    ) -> Result<Option<ResolvedSegment>, CatalogError> {
        let Some(segment_id) = parse_loose_id(request.segment_id.as_deref()) else {
            if request.segment_id.is_some() {
                tracing::debug!(
                    segment_id = request.segment_id.as_deref(),
                    "malformed segment id, skipping segment resolution"
                );
            }
            return Ok(None);
        };

        let Some(segment) = self.segments.find_by_id(segment_id).await? else {
            tracing::debug!(%segment_id, "segment not found, skipping segment resolution");
            return Ok(None);
        };

        let link = self.links.find_segment_link(segment.id, company_id).await?;
        let label_for_scrape = link
            .as_ref()
            .and_then(|l| non_empty_trimmed(l.segment_label_as_company.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| segment.label.clone());

        Ok(Some(ResolvedSegment {
            id: segment.id,
            label: segment.label,
            label_for_scrape,
        }))
    }
}

fn describe_reference(id: Option<&str>, name: Option<&str>) -> String {
    match (id, name) {
        (Some(id), Some(name)) => format!("id={id} name={name}"),
        (Some(id), None) => format!("id={id}"),
        (None, Some(name)) => format!("name={name}"),
        (None, None) => "no identifying input".to_string(),
    }
}
