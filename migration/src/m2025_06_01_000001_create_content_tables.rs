//! Migration to create the content tables.
//!
//! Creates categories, tags, contents, the content/tag join table and the
//! append-only content_versions snapshot table. Unique indexes on slugs are
//! partial (`deleted_at IS NULL`) so a soft-deleted slug can be reused.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Categories::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Categories::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Categories::Slug).string_len(255).not_null())
                    .col(ColumnDef::new(Categories::Description).text())
                    .col(ColumnDef::new(Categories::ParentId).uuid())
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Categories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Categories::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categories_parent")
                            .from(Categories::Table, Categories::ParentId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_categories_slug")
                    .table(Categories::Table)
                    .col(Categories::Slug)
                    .unique()
                    .and_where(Expr::col(Categories::DeletedAt).is_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tags::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tags::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Tags::Slug).string_len(100).not_null())
                    .col(ColumnDef::new(Tags::Description).text())
                    .col(
                        ColumnDef::new(Tags::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tags::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Tags::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tags_slug")
                    .table(Tags::Table)
                    .col(Tags::Slug)
                    .unique()
                    .and_where(Expr::col(Tags::DeletedAt).is_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Contents::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Contents::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Contents::Slug).string_len(255).not_null())
                    .col(ColumnDef::new(Contents::Body).text().not_null())
                    .col(ColumnDef::new(Contents::ContentType).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Contents::Status)
                            .string_len(20)
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(Contents::PublishedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Contents::Excerpt).string_len(500))
                    .col(ColumnDef::new(Contents::FeaturedImage).string_len(500))
                    .col(
                        ColumnDef::new(Contents::ReadingTime)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Contents::AuthorId).string_len(255).not_null())
                    .col(ColumnDef::new(Contents::CategoryId).uuid())
                    .col(
                        ColumnDef::new(Contents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Contents::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Contents::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contents_category")
                            .from(Contents::Table, Contents::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contents_slug")
                    .table(Contents::Table)
                    .col(Contents::Slug)
                    .unique()
                    .and_where(Expr::col(Contents::DeletedAt).is_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contents_status_created_at")
                    .table(Contents::Table)
                    .col(Contents::Status)
                    .col(Contents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContentTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ContentTags::ContentId).uuid().not_null())
                    .col(ColumnDef::new(ContentTags::TagId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(ContentTags::ContentId)
                            .col(ContentTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_tags_content")
                            .from(ContentTags::Table, ContentTags::ContentId)
                            .to(Contents::Table, Contents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_tags_tag")
                            .from(ContentTags::Table, ContentTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContentVersions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentVersions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContentVersions::ContentId).uuid().not_null())
                    .col(
                        ColumnDef::new(ContentVersions::Title)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContentVersions::Body).text().not_null())
                    .col(ColumnDef::new(ContentVersions::Excerpt).string_len(500))
                    .col(ColumnDef::new(ContentVersions::Metadata).json_binary())
                    .col(
                        ColumnDef::new(ContentVersions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_versions_content")
                            .from(ContentVersions::Table, ContentVersions::ContentId)
                            .to(Contents::Table, Contents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_content_versions_content_id")
                    .table(ContentVersions::Table)
                    .col(ContentVersions::ContentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentVersions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContentTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Slug,
    Description,
    ParentId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
    Slug,
    Description,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Contents {
    Table,
    Id,
    Title,
    Slug,
    Body,
    ContentType,
    Status,
    PublishedAt,
    Excerpt,
    FeaturedImage,
    ReadingTime,
    AuthorId,
    CategoryId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum ContentTags {
    Table,
    ContentId,
    TagId,
}

#[derive(DeriveIden)]
enum ContentVersions {
    Table,
    Id,
    ContentId,
    Title,
    Body,
    Excerpt,
    Metadata,
    CreatedAt,
}
