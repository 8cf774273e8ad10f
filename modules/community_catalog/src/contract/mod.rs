//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::CatalogApi;
pub use error::CatalogError;
pub use model::{
    Community, CommunityCompanyLink, CommunityUpdate, Company, NewCommunity, NewCompany, Plan,
    PlanCommunityRef, PlanCompanyRef, PlanDraft, PlanKind, PlanView, PriceChange, ProductSegment,
    ResolveRequest, ResolvedEntities, ResolvedSegment, SegmentCompanyLink,
};
