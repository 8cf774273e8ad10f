//! Domain layer - business logic and services

mod ident;
pub mod ledger;
pub mod projector;
pub mod registry;
pub mod repository;
pub mod resolver;

pub use ledger::PriceLedger;
pub use projector::PlanProjector;
pub use registry::Registry;
pub use repository::{
    AliasLinkRepository, CommunityRepository, CompanyRepository, PlanRepository,
    PriceHistoryRepository, SegmentRepository,
};
pub use resolver::Resolver;
