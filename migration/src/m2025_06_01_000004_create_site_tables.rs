//! Migration to create the remaining site tables.
//!
//! Creates navigation_menus, media and geo_settings.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NavigationMenus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NavigationMenus::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NavigationMenus::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(NavigationMenus::Location)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(NavigationMenus::Items).json_binary().not_null())
                    .col(ColumnDef::new(NavigationMenus::Locale).string_len(10))
                    .col(
                        ColumnDef::new(NavigationMenus::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(NavigationMenus::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(NavigationMenus::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(NavigationMenus::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(NavigationMenus::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Media::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Media::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Media::Filename).string_len(255).not_null())
                    .col(ColumnDef::new(Media::Url).string_len(500).not_null())
                    .col(ColumnDef::new(Media::MimeType).string_len(100))
                    .col(ColumnDef::new(Media::FileSize).big_integer())
                    .col(ColumnDef::new(Media::Width).integer())
                    .col(ColumnDef::new(Media::Height).integer())
                    .col(ColumnDef::new(Media::AltText).string_len(500))
                    .col(ColumnDef::new(Media::Caption).text())
                    .col(ColumnDef::new(Media::Title).string_len(500))
                    .col(ColumnDef::new(Media::Metadata).json_binary())
                    .col(
                        ColumnDef::new(Media::StorageType)
                            .string_len(10)
                            .not_null()
                            .default("local"),
                    )
                    .col(
                        ColumnDef::new(Media::UploadedByUserId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Media::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Media::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Media::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GeoSettings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GeoSettings::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(GeoSettings::CountryCode)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeoSettings::LanguageCode)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GeoSettings::Region).string_len(50))
                    .col(ColumnDef::new(GeoSettings::Timezone).string_len(50))
                    .col(ColumnDef::new(GeoSettings::Currency).string_len(10))
                    .col(ColumnDef::new(GeoSettings::HreflangConfig).json_binary())
                    .col(ColumnDef::new(GeoSettings::RegionalSchemaOverrides).json_binary())
                    .col(ColumnDef::new(GeoSettings::RegionalAnalyticsOverrides).json_binary())
                    .col(
                        ColumnDef::new(GeoSettings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(GeoSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(GeoSettings::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_geo_settings_country_code")
                    .table(GeoSettings::Table)
                    .col(GeoSettings::CountryCode)
                    .unique()
                    .and_where(Expr::col(GeoSettings::DeletedAt).is_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GeoSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Media::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NavigationMenus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NavigationMenus {
    Table,
    Id,
    Name,
    Location,
    Items,
    Locale,
    IsActive,
    SortOrder,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Media {
    Table,
    Id,
    Filename,
    Url,
    MimeType,
    FileSize,
    Width,
    Height,
    AltText,
    Caption,
    Title,
    Metadata,
    StorageType,
    UploadedByUserId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum GeoSettings {
    Table,
    Id,
    CountryCode,
    LanguageCode,
    Region,
    Timezone,
    Currency,
    HreflangConfig,
    RegionalSchemaOverrides,
    RegionalAnalyticsOverrides,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
