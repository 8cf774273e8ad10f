//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use crate::contract::{
    Community, CommunityCompanyLink, Company, Plan, PlanCommunityRef, PlanCompanyRef, PlanKind,
    PriceChange, ProductSegment, SegmentCompanyLink,
};

use super::entity;

// ===== Community Conversions =====

impl From<entity::community::Model> for Community {
    fn from(entity: entity::community::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            parent_id: entity.parent_id,
            description: entity.description,
            location: entity.location,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Community> for entity::community::ActiveModel {
    fn from(model: &Community) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            parent_id: Set(model.parent_id),
            description: Set(model.description.clone()),
            location: Set(model.location.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Company Conversions =====

impl From<entity::company::Model> for Company {
    fn from(entity: entity::company::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            website: entity.website,
            total_communities: entity.total_communities,
            total_plans: entity.total_plans,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Company> for entity::company::ActiveModel {
    fn from(model: &Company) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            slug: Set(model.slug.clone()),
            website: Set(model.website.clone()),
            total_communities: Set(model.total_communities),
            total_plans: Set(model.total_plans),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Segment Conversions =====

impl From<entity::segment::Model> for ProductSegment {
    fn from(entity: entity::segment::Model) -> Self {
        Self {
            id: entity.id,
            community_id: entity.community_id,
            name: entity.name,
            label: entity.label,
            active: entity.active,
            display_order: entity.display_order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&ProductSegment> for entity::segment::ActiveModel {
    fn from(model: &ProductSegment) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(model.id),
            community_id: Set(model.community_id),
            name: Set(model.name.clone()),
            label: Set(model.label.clone()),
            active: Set(model.active),
            display_order: Set(model.display_order),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Alias Link Conversions =====

impl From<entity::community_company::Model> for CommunityCompanyLink {
    fn from(entity: entity::community_company::Model) -> Self {
        Self {
            community_id: entity.community_id,
            company_id: entity.company_id,
            name_used_by_company: entity.name_used_by_company,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&CommunityCompanyLink> for entity::community_company::ActiveModel {
    fn from(model: &CommunityCompanyLink) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            community_id: Set(model.community_id),
            company_id: Set(model.company_id),
            name_used_by_company: Set(model.name_used_by_company.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

impl From<entity::segment_company::Model> for SegmentCompanyLink {
    fn from(entity: entity::segment_company::Model) -> Self {
        Self {
            segment_id: entity.segment_id,
            company_id: entity.company_id,
            segment_label_as_company: entity.segment_label_as_company,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&SegmentCompanyLink> for entity::segment_company::ActiveModel {
    fn from(model: &SegmentCompanyLink) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            segment_id: Set(model.segment_id),
            company_id: Set(model.company_id),
            segment_label_as_company: Set(model.segment_label_as_company.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Plan Conversions =====

/// Stored discriminator for floor plans
pub const KIND_PLAN: &str = "plan";
/// Stored discriminator for spec-home listings
pub const KIND_NOW: &str = "now";

pub fn kind_to_str(kind: PlanKind) -> &'static str {
    match kind {
        PlanKind::Plan => KIND_PLAN,
        PlanKind::Now => KIND_NOW,
    }
}

pub fn kind_from_str(raw: &str) -> PlanKind {
    match raw {
        KIND_NOW => PlanKind::Now,
        _ => PlanKind::Plan,
    }
}

impl From<entity::plan::Model> for Plan {
    fn from(entity: entity::plan::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            price: entity.price,
            sqft: entity.sqft,
            stories: entity.stories,
            beds: entity.beds,
            baths: entity.baths,
            address: entity.address,
            kind: kind_from_str(&entity.kind),
            company: PlanCompanyRef {
                id: entity.company_id,
                name: entity.company_name,
            },
            community: PlanCommunityRef {
                id: entity.community_id,
                name: entity.community_name,
                location: entity.community_location,
            },
            last_updated: entity.last_updated,
        }
    }
}

impl From<&Plan> for entity::plan::ActiveModel {
    fn from(model: &Plan) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            price: Set(model.price),
            sqft: Set(model.sqft),
            stories: Set(model.stories),
            beds: Set(model.beds),
            baths: Set(model.baths),
            address: Set(model.address.clone()),
            kind: Set(kind_to_str(model.kind).to_string()),
            company_id: Set(model.company.id),
            company_name: Set(model.company.name.clone()),
            community_id: Set(model.community.id),
            community_name: Set(model.community.name.clone()),
            community_location: Set(model.community.location.clone()),
            last_updated: Set(model.last_updated),
        }
    }
}

// ===== Price History Conversions =====

impl From<entity::price_change::Model> for PriceChange {
    fn from(entity: entity::price_change::Model) -> Self {
        Self {
            id: entity.id,
            plan_id: entity.plan_id,
            old_price: entity.old_price,
            new_price: entity.new_price,
            changed_at: entity.changed_at,
        }
    }
}

impl From<&PriceChange> for entity::price_change::ActiveModel {
    fn from(model: &PriceChange) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(model.id),
            plan_id: Set(model.plan_id),
            old_price: Set(model.old_price),
            new_price: Set(model.new_price),
            changed_at: Set(model.changed_at),
        }
    }
}
