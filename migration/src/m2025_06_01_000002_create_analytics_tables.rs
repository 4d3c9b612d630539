//! Migration to create the analytics configuration tables.
//!
//! Creates analytics_configs, site_verifications, custom_scripts and
//! feature_flags. These are independent lookup tables consumed by the
//! site-config snapshot loader at page render time.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AnalyticsConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnalyticsConfigs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AnalyticsConfigs::Platform)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AnalyticsConfigs::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(AnalyticsConfigs::TrackingId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnalyticsConfigs::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AnalyticsConfigs::Environment)
                            .string_len(20)
                            .not_null()
                            .default("all"),
                    )
                    .col(ColumnDef::new(AnalyticsConfigs::AdditionalConfig).json_binary())
                    .col(
                        ColumnDef::new(AnalyticsConfigs::Priority)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(AnalyticsConfigs::CreatedByUserId).string_len(255))
                    .col(
                        ColumnDef::new(AnalyticsConfigs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AnalyticsConfigs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(AnalyticsConfigs::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_analytics_configs_platform")
                    .table(AnalyticsConfigs::Table)
                    .col(AnalyticsConfigs::Platform)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SiteVerifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SiteVerifications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SiteVerifications::Platform)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SiteVerifications::VerificationCode)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SiteVerifications::MetaTag).text())
                    .col(
                        ColumnDef::new(SiteVerifications::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(SiteVerifications::VerifiedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(SiteVerifications::LastChecked).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(SiteVerifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SiteVerifications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(SiteVerifications::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_site_verifications_platform")
                    .table(SiteVerifications::Table)
                    .col(SiteVerifications::Platform)
                    .unique()
                    .and_where(Expr::col(SiteVerifications::DeletedAt).is_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CustomScripts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomScripts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CustomScripts::Name).string_len(255).not_null())
                    .col(ColumnDef::new(CustomScripts::ScriptContent).text().not_null())
                    .col(
                        ColumnDef::new(CustomScripts::Position)
                            .string_len(20)
                            .not_null()
                            .default("head-end"),
                    )
                    .col(ColumnDef::new(CustomScripts::TargetPages).json_binary())
                    .col(ColumnDef::new(CustomScripts::ContentTypes).json_binary())
                    .col(
                        ColumnDef::new(CustomScripts::Priority)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CustomScripts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CustomScripts::Environment)
                            .string_len(20)
                            .not_null()
                            .default("all"),
                    )
                    .col(ColumnDef::new(CustomScripts::CreatedByUserId).string_len(255))
                    .col(
                        ColumnDef::new(CustomScripts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CustomScripts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(CustomScripts::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FeatureFlags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeatureFlags::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeatureFlags::FlagName).string_len(100).not_null())
                    .col(ColumnDef::new(FeatureFlags::Description).text())
                    .col(
                        ColumnDef::new(FeatureFlags::IsEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(FeatureFlags::Environment)
                            .string_len(20)
                            .not_null()
                            .default("all"),
                    )
                    .col(
                        ColumnDef::new(FeatureFlags::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(FeatureFlags::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(FeatureFlags::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feature_flags_flag_name")
                    .table(FeatureFlags::Table)
                    .col(FeatureFlags::FlagName)
                    .unique()
                    .and_where(Expr::col(FeatureFlags::DeletedAt).is_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeatureFlags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CustomScripts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SiteVerifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnalyticsConfigs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AnalyticsConfigs {
    Table,
    Id,
    Platform,
    Name,
    TrackingId,
    IsActive,
    Environment,
    AdditionalConfig,
    Priority,
    CreatedByUserId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum SiteVerifications {
    Table,
    Id,
    Platform,
    VerificationCode,
    MetaTag,
    IsVerified,
    VerifiedAt,
    LastChecked,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum CustomScripts {
    Table,
    Id,
    Name,
    ScriptContent,
    Position,
    TargetPages,
    ContentTypes,
    Priority,
    IsActive,
    Environment,
    CreatedByUserId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum FeatureFlags {
    Table,
    Id,
    FlagName,
    Description,
    IsEnabled,
    Environment,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
