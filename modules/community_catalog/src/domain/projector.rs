//! Plan projector - externally visible plan records with recency annotation

use super::ledger::PriceLedger;
use super::repository::{CommunityRepository, PlanRepository};
use crate::contract::{CatalogError, Plan, PlanView};
use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

/// Domain service assembling the read-side plan listing for a community.
pub struct PlanProjector {
    communities: Arc<dyn CommunityRepository>,
    plans: Arc<dyn PlanRepository>,
    ledger: Arc<PriceLedger>,
    default_window: Duration,
}

impl PlanProjector {
    /// Create a new projector instance
    pub fn new(
        communities: Arc<dyn CommunityRepository>,
        plans: Arc<dyn PlanRepository>,
        ledger: Arc<PriceLedger>,
        default_window: Duration,
    ) -> Self {
        Self {
            communities,
            plans,
            ledger,
            default_window,
        }
    }

    /// Project all displayable plans of a community, ordered by last update
    /// descending, each annotated with `price_changed_recently`.
    ///
    /// A malformed or unknown community id fails with `NotFound` - an empty
    /// list and an invalid scope are different conditions callers must be
    /// able to distinguish.
    pub async fn project_for_community(
        &self,
        community_id: &str,
        window: Option<Duration>,
    ) -> Result<Vec<PlanView>, CatalogError> {
        let id = Uuid::parse_str(community_id.trim())
            .map_err(|_| CatalogError::not_found("community", community_id))?;

        self.communities
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("community", community_id))?;

        let plans = self.plans.find_complete_by_community(id).await?;
        let plan_ids: Vec<Uuid> = plans.iter().map(|p| p.id).collect();

        let window = window.unwrap_or(self.default_window);
        let changed = self.ledger.changed_within(&plan_ids, window).await?;

        let views = plans
            .into_iter()
            .filter_map(|plan| {
                let recently = changed.contains(&plan.id);
                let view = into_view(plan, recently);
                if view.is_none() {
                    tracing::debug!("plan missing display fields, skipped from projection");
                }
                view
            })
            .collect();

        Ok(views)
    }
}

/// Build the external view, or `None` when a required display field is
/// missing. Partially-ingested plans are never surfaced; the flag comes
/// purely from ledger membership, never from comparing cached values.
fn into_view(plan: Plan, price_changed_recently: bool) -> Option<PlanView> {
    let name = plan.name?;
    let price = plan.price?;
    let company_name = plan.company.name.clone()?;
    let community_name = plan.community.name.clone()?;

    Some(PlanView {
        id: plan.id,
        name,
        price,
        sqft: plan.sqft,
        stories: plan.stories,
        beds: plan.beds,
        baths: plan.baths,
        address: plan.address,
        kind: plan.kind,
        company_name,
        community_name,
        company: plan.company,
        community: plan.community,
        price_changed_recently,
        last_updated: plan.last_updated,
    })
}
