//! SeaORM entities for database tables

/// Communities table entity
pub mod community {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "communities")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Canonical display name
        pub name: String,

        /// Optional parent community (tree, no cascading deletes)
        pub parent_id: Option<Uuid>,

        pub description: Option<String>,

        pub location: Option<String>,

        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Self-reference to the parent community
        #[sea_orm(
            belongs_to = "Entity",
            from = "Column::ParentId",
            to = "Column::Id"
        )]
        Parent,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Companies table entity
pub mod company {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "companies")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Globally unique name
        #[sea_orm(unique)]
        pub name: String,

        pub slug: Option<String>,

        pub website: Option<String>,

        /// Denormalized summary, refreshed out of band
        pub total_communities: i64,

        /// Denormalized summary, refreshed out of band
        pub total_plans: i64,

        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Product segments table entity
pub mod segment {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "product_segments")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub community_id: Uuid,

        /// Unique per community
        pub name: String,

        pub label: String,

        pub active: bool,

        pub display_order: i32,

        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::community::Entity",
            from = "Column::CommunityId",
            to = "super::community::Column::Id"
        )]
        Community,
    }

    impl Related<super::community::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Community.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Community-company alias link table entity
pub mod community_company {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "community_companies")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub community_id: Uuid,

        #[sea_orm(primary_key, auto_increment = false)]
        pub company_id: Uuid,

        /// Name this company's source material uses for the community,
        /// when it differs from the canonical name
        pub name_used_by_company: Option<String>,

        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::community::Entity",
            from = "Column::CommunityId",
            to = "super::community::Column::Id"
        )]
        Community,
        #[sea_orm(
            belongs_to = "super::company::Entity",
            from = "Column::CompanyId",
            to = "super::company::Column::Id"
        )]
        Company,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Segment-company alias link table entity
pub mod segment_company {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "segment_companies")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub segment_id: Uuid,

        #[sea_orm(primary_key, auto_increment = false)]
        pub company_id: Uuid,

        /// Per-company label override for the segment
        pub segment_label_as_company: Option<String>,

        pub created_at: DateTimeUtc,

        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::segment::Entity",
            from = "Column::SegmentId",
            to = "super::segment::Column::Id"
        )]
        Segment,
        #[sea_orm(
            belongs_to = "super::company::Entity",
            from = "Column::CompanyId",
            to = "super::company::Column::Id"
        )]
        Company,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Plans table entity
///
/// Company and community references are embedded name snapshots captured at
/// write time; the natural key is (name, company_name, community_name, kind).
pub mod plan {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "plans")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub name: Option<String>,

        #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
        pub price: Option<Decimal>,

        pub sqft: Option<i32>,

        pub stories: Option<i32>,

        pub beds: Option<i32>,

        #[sea_orm(column_type = "Decimal(Some((4, 1)))", nullable)]
        pub baths: Option<Decimal>,

        pub address: Option<String>,

        /// "plan" or "now" (spec home)
        pub kind: String,

        pub company_id: Option<Uuid>,

        pub company_name: Option<String>,

        pub community_id: Option<Uuid>,

        pub community_name: Option<String>,

        pub community_location: Option<String>,

        pub last_updated: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// One-to-many relationship with price history
        #[sea_orm(has_many = "super::price_change::Entity")]
        PriceHistory,
    }

    impl Related<super::price_change::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::PriceHistory.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Price history table entity - append-only, never updated or deleted
pub mod price_change {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "price_history")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub plan_id: Uuid,

        #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
        pub old_price: Option<Decimal>,

        #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
        pub new_price: Decimal,

        pub changed_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::plan::Entity",
            from = "Column::PlanId",
            to = "super::plan::Column::Id"
        )]
        Plan,
    }

    impl Related<super::plan::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Plan.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
