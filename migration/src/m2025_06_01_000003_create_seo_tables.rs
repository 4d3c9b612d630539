//! Migration to create the SEO tables.
//!
//! Creates seo_metadata (one-to-one overlay on contents) and
//! structured_data_templates (reusable JSON-LD fragments).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SeoMetadata::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SeoMetadata::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(SeoMetadata::ContentId).uuid())
                    .col(ColumnDef::new(SeoMetadata::MetaTitle).string_len(255))
                    .col(ColumnDef::new(SeoMetadata::MetaDescription).text())
                    .col(ColumnDef::new(SeoMetadata::MetaKeywords).string_len(500))
                    .col(ColumnDef::new(SeoMetadata::OgTitle).string_len(255))
                    .col(ColumnDef::new(SeoMetadata::OgDescription).text())
                    .col(ColumnDef::new(SeoMetadata::OgImage).string_len(500))
                    .col(ColumnDef::new(SeoMetadata::OgType).string_len(50))
                    .col(ColumnDef::new(SeoMetadata::OgUrl).string_len(255))
                    .col(ColumnDef::new(SeoMetadata::OgSiteName).string_len(100))
                    .col(ColumnDef::new(SeoMetadata::TwitterCard).string_len(50))
                    .col(ColumnDef::new(SeoMetadata::TwitterSite).string_len(100))
                    .col(ColumnDef::new(SeoMetadata::TwitterCreator).string_len(100))
                    .col(ColumnDef::new(SeoMetadata::TwitterImage).string_len(500))
                    .col(ColumnDef::new(SeoMetadata::CanonicalUrl).string_len(500))
                    .col(ColumnDef::new(SeoMetadata::Hreflang).json_binary())
                    .col(ColumnDef::new(SeoMetadata::CustomMeta).json_binary())
                    .col(
                        ColumnDef::new(SeoMetadata::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SeoMetadata::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(SeoMetadata::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seo_metadata_content_id")
                    .table(SeoMetadata::Table)
                    .col(SeoMetadata::ContentId)
                    .unique()
                    .and_where(Expr::col(SeoMetadata::DeletedAt).is_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StructuredDataTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StructuredDataTemplates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StructuredDataTemplates::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StructuredDataTemplates::SchemaType)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StructuredDataTemplates::Template)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StructuredDataTemplates::IsGlobal)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StructuredDataTemplates::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(StructuredDataTemplates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(StructuredDataTemplates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(StructuredDataTemplates::DeletedAt)
                            .timestamp_with_time_zone(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StructuredDataTemplates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SeoMetadata::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SeoMetadata {
    Table,
    Id,
    ContentId,
    MetaTitle,
    MetaDescription,
    MetaKeywords,
    OgTitle,
    OgDescription,
    OgImage,
    OgType,
    OgUrl,
    OgSiteName,
    TwitterCard,
    TwitterSite,
    TwitterCreator,
    TwitterImage,
    CanonicalUrl,
    Hreflang,
    CustomMeta,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum StructuredDataTemplates {
    Table,
    Id,
    Name,
    SchemaType,
    Template,
    IsGlobal,
    IsActive,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
