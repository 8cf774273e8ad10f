//! Price ledger - append-only price-change events per plan
//!
//! Events are immutable and never merged or deduplicated: oscillating prices
//! each produce a distinct event. The ledger answers "did plan P change price
//! within window W" without rescanning full history.

use super::repository::{PlanRepository, PriceHistoryRepository};
use crate::contract::{CatalogError, Plan, PriceChange};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Domain service over the append-only price-change log.
pub struct PriceLedger {
    history: Arc<dyn PriceHistoryRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl PriceLedger {
    /// Create a new ledger instance
    pub fn new(history: Arc<dyn PriceHistoryRepository>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { history, plans }
    }

    /// Append one immutable price-change event.
    pub async fn record_change(
        &self,
        plan_id: Uuid,
        old_price: Option<Decimal>,
        new_price: Decimal,
        at: DateTime<Utc>,
    ) -> Result<PriceChange, CatalogError> {
        let change = PriceChange {
            id: Uuid::new_v4(),
            plan_id,
            old_price,
            new_price,
            changed_at: at,
        };
        Ok(self.history.append(&change).await?)
    }

    /// Apply a newly observed price to a plan.
    ///
    /// When the observed price differs from the stored one, the ledger event
    /// is appended before the plan row is rewritten, so a reader can never
    /// see the new price without its history event. An unchanged price is a
    /// no-op; a first observation (no stored price) updates the plan without
    /// an event, since there is no change to record.
    pub async fn apply_observed_price(
        &self,
        plan_id: Uuid,
        new_price: Decimal,
    ) -> Result<Plan, CatalogError> {
        let plan = self
            .plans
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("plan", plan_id.to_string()))?;

        if plan.price == Some(new_price) {
            return Ok(plan);
        }

        let now = Utc::now();
        if let Some(old_price) = plan.price {
            self.record_change(plan_id, Some(old_price), new_price, now)
                .await?;
            tracing::debug!(%plan_id, %old_price, %new_price, "price change recorded");
        }
        self.plans.set_price(plan_id, new_price, now).await?;

        self.plans
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("plan", plan_id.to_string()))
    }

    /// Among the candidates, the plan ids with at least one event inside
    /// `[now - window, now]`.
    pub async fn changed_within(
        &self,
        plan_ids: &[Uuid],
        window: Duration,
    ) -> Result<HashSet<Uuid>, CatalogError> {
        if plan_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let cutoff = Utc::now() - window;
        Ok(self.history.changed_since(plan_ids, cutoff).await?)
    }

    /// All events for a plan, newest first.
    pub async fn history_for_plan(&self, plan_id: Uuid) -> Result<Vec<PriceChange>, CatalogError> {
        Ok(self.history.list_for_plan(plan_id).await?)
    }
}
