//! Database migrations for the community catalog

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250110_000001_create_registry::Migration),
            Box::new(m20250110_000002_create_alias_links::Migration),
            Box::new(m20250110_000003_create_plans::Migration),
        ]
    }
}

mod m20250110_000001_create_registry {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Communities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Communities::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Communities::Name).string().not_null())
                        .col(ColumnDef::new(Communities::ParentId).uuid())
                        .col(ColumnDef::new(Communities::Description).text())
                        .col(ColumnDef::new(Communities::Location).string())
                        .col(
                            ColumnDef::new(Communities::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Communities::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_communities_parent")
                                .from(Communities::Table, Communities::ParentId)
                                .to(Communities::Table, Communities::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            // Name lookups are case-insensitive whole-string matches
            manager
                .create_index(
                    Index::create()
                        .name("idx_communities_name")
                        .table(Communities::Table)
                        .col(Communities::Name)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Companies::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Companies::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Companies::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Companies::Slug).string())
                        .col(ColumnDef::new(Companies::Website).string())
                        .col(
                            ColumnDef::new(Companies::TotalCommunities)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Companies::TotalPlans)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Companies::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Companies::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductSegments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductSegments::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProductSegments::CommunityId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductSegments::Name).string().not_null())
                        .col(ColumnDef::new(ProductSegments::Label).string().not_null())
                        .col(
                            ColumnDef::new(ProductSegments::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(ProductSegments::DisplayOrder)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductSegments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(ProductSegments::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_segments_community")
                                .from(ProductSegments::Table, ProductSegments::CommunityId)
                                .to(Communities::Table, Communities::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            // Segment names are unique per community
            manager
                .create_index(
                    Index::create()
                        .name("uq_product_segments_community_name")
                        .table(ProductSegments::Table)
                        .col(ProductSegments::CommunityId)
                        .col(ProductSegments::Name)
                        .unique()
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductSegments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Companies::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Communities::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Communities {
        Table,
        Id,
        Name,
        ParentId,
        Description,
        Location,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Companies {
        Table,
        Id,
        Name,
        Slug,
        Website,
        TotalCommunities,
        TotalPlans,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum ProductSegments {
        Table,
        Id,
        CommunityId,
        Name,
        Label,
        Active,
        DisplayOrder,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250110_000002_create_alias_links {
    use super::m20250110_000001_create_registry::{Communities, Companies, ProductSegments};
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CommunityCompanies::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CommunityCompanies::CommunityId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CommunityCompanies::CompanyId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CommunityCompanies::NameUsedByCompany).string())
                        .col(
                            ColumnDef::new(CommunityCompanies::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(CommunityCompanies::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .primary_key(
                            Index::create()
                                .col(CommunityCompanies::CommunityId)
                                .col(CommunityCompanies::CompanyId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_community_companies_community")
                                .from(CommunityCompanies::Table, CommunityCompanies::CommunityId)
                                .to(Communities::Table, Communities::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_community_companies_company")
                                .from(CommunityCompanies::Table, CommunityCompanies::CompanyId)
                                .to(Companies::Table, Companies::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SegmentCompanies::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SegmentCompanies::SegmentId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SegmentCompanies::CompanyId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SegmentCompanies::SegmentLabelAsCompany).string())
                        .col(
                            ColumnDef::new(SegmentCompanies::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(SegmentCompanies::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .primary_key(
                            Index::create()
                                .col(SegmentCompanies::SegmentId)
                                .col(SegmentCompanies::CompanyId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_segment_companies_segment")
                                .from(SegmentCompanies::Table, SegmentCompanies::SegmentId)
                                .to(ProductSegments::Table, ProductSegments::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_segment_companies_company")
                                .from(SegmentCompanies::Table, SegmentCompanies::CompanyId)
                                .to(Companies::Table, Companies::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SegmentCompanies::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(CommunityCompanies::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum CommunityCompanies {
        Table,
        CommunityId,
        CompanyId,
        NameUsedByCompany,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum SegmentCompanies {
        Table,
        SegmentId,
        CompanyId,
        SegmentLabelAsCompany,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250110_000003_create_plans {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Plans::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Plans::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Plans::Name).string())
                        .col(ColumnDef::new(Plans::Price).decimal_len(12, 2))
                        .col(ColumnDef::new(Plans::Sqft).integer())
                        .col(ColumnDef::new(Plans::Stories).integer())
                        .col(ColumnDef::new(Plans::Beds).integer())
                        .col(ColumnDef::new(Plans::Baths).decimal_len(4, 1))
                        .col(ColumnDef::new(Plans::Address).string())
                        .col(ColumnDef::new(Plans::Kind).string().not_null())
                        .col(ColumnDef::new(Plans::CompanyId).uuid())
                        .col(ColumnDef::new(Plans::CompanyName).string())
                        .col(ColumnDef::new(Plans::CommunityId).uuid())
                        .col(ColumnDef::new(Plans::CommunityName).string())
                        .col(ColumnDef::new(Plans::CommunityLocation).string())
                        .col(
                            ColumnDef::new(Plans::LastUpdated)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            // Natural key: embedded name snapshots plus kind, not ids, so
            // plan identity survives entity renames
            manager
                .create_index(
                    Index::create()
                        .name("uq_plans_natural_key")
                        .table(Plans::Table)
                        .col(Plans::Name)
                        .col(Plans::CompanyName)
                        .col(Plans::CommunityName)
                        .col(Plans::Kind)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_plans_community_id")
                        .table(Plans::Table)
                        .col(Plans::CommunityId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PriceHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PriceHistory::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(PriceHistory::PlanId).uuid().not_null())
                        .col(ColumnDef::new(PriceHistory::OldPrice).decimal_len(12, 2))
                        .col(
                            ColumnDef::new(PriceHistory::NewPrice)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PriceHistory::ChangedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_price_history_plan")
                                .from(PriceHistory::Table, PriceHistory::PlanId)
                                .to(Plans::Table, Plans::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            // Windowed "changed recently" queries scan this index, never
            // the full history
            manager
                .create_index(
                    Index::create()
                        .name("idx_price_history_plan_changed_at")
                        .table(PriceHistory::Table)
                        .col(PriceHistory::PlanId)
                        .col(PriceHistory::ChangedAt)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PriceHistory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Plans::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Plans {
        Table,
        Id,
        Name,
        Price,
        Sqft,
        Stories,
        Beds,
        Baths,
        Address,
        Kind,
        CompanyId,
        CompanyName,
        CommunityId,
        CommunityName,
        CommunityLocation,
        LastUpdated,
    }

    #[derive(DeriveIden)]
    enum PriceHistory {
        Table,
        Id,
        PlanId,
        OldPrice,
        NewPrice,
        ChangedAt,
    }
}
