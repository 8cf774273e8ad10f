//! Community Catalog Module
//!
//! Cross-source entity resolution and time-windowed price-change detection
//! for new-home builder communities. External sources refer to the same
//! physical community or company under inconsistent names; the resolver maps
//! loose input to canonical records and the display names each source
//! expects, while the price ledger tracks immutable per-plan price-change
//! events so "changed recently" queries never rescan full history.

// Public exports
pub mod contract;
pub use contract::{
    CatalogApi, CatalogError, Community, CommunityUpdate, Company, NewCommunity, NewCompany, Plan,
    PlanDraft, PlanKind, PlanView, PriceChange, ProductSegment, ResolveRequest, ResolvedEntities,
    ResolvedSegment,
};

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
