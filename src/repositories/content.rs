//! Content repository for database operations
//!
//! Encapsulates SeaORM operations for contents, their version snapshots and
//! the tag join table. All reads exclude soft-deleted rows; every update
//! writes one version snapshot in the same transaction as the change.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::category::{self, Entity as Category};
use crate::models::content::{self, Entity as Content};
use crate::models::content_tag::{self, Entity as ContentTag};
use crate::models::content_version::{self, Entity as ContentVersion};
use crate::models::enums::{ContentStatus, ContentType};
use crate::models::tag::{self, Entity as Tag};

/// Filters for content listings.
#[derive(Debug, Default, Clone)]
pub struct ContentFilter {
    pub content_type: Option<ContentType>,
    pub status: Option<ContentStatus>,
    pub category_id: Option<Uuid>,
    pub author_id: Option<String>,
    pub search: Option<String>,
    pub tag_slug: Option<String>,
}

/// Fields for creating a content document.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub content_type: ContentType,
    pub status: ContentStatus,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub author_id: String,
    pub category_id: Option<Uuid>,
    pub tag_ids: Vec<Uuid>,
}

/// Partial update; `None` leaves a field untouched. `category_id` and the
/// tag list use an outer `Option` to distinguish "unchanged" from "cleared".
#[derive(Debug, Default, Clone)]
pub struct ContentChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub content_type: Option<ContentType>,
    pub status: Option<ContentStatus>,
    pub excerpt: Option<Option<String>>,
    pub featured_image: Option<Option<String>>,
    pub category_id: Option<Option<Uuid>>,
    pub tag_ids: Option<Vec<Uuid>>,
}

/// Estimated minutes to read at 200 words per minute, rounded up.
pub fn reading_time_minutes(body: &str) -> i32 {
    let words = body.split_whitespace().count();
    words.div_ceil(200) as i32
}

/// Repository for content database operations
#[derive(Debug, Clone)]
pub struct ContentRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ContentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists non-deleted content matching the filter, newest first, together
    /// with the total match count for pagination metadata.
    pub async fn list(
        &self,
        filter: ContentFilter,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<content::Model>, u64)> {
        let mut query = Content::find().filter(content::Column::DeletedAt.is_null());

        if let Some(content_type) = filter.content_type {
            query = query.filter(content::Column::ContentType.eq(content_type));
        }
        if let Some(status) = filter.status {
            query = query.filter(content::Column::Status.eq(status));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(content::Column::CategoryId.eq(category_id));
        }
        if let Some(ref author_id) = filter.author_id {
            query = query.filter(content::Column::AuthorId.eq(author_id.clone()));
        }
        if let Some(ref search) = filter.search {
            query = query.filter(
                Condition::any()
                    .add(content::Column::Title.contains(search))
                    .add(content::Column::Body.contains(search))
                    .add(content::Column::Excerpt.contains(search)),
            );
        }
        if let Some(ref tag_slug) = filter.tag_slug {
            let Some(tag) = Tag::find()
                .filter(tag::Column::Slug.eq(tag_slug.clone()))
                .filter(tag::Column::DeletedAt.is_null())
                .one(&*self.db)
                .await?
            else {
                return Ok((Vec::new(), 0));
            };
            let content_ids: Vec<Uuid> = ContentTag::find()
                .filter(content_tag::Column::TagId.eq(tag.id))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|row| row.content_id)
                .collect();
            if content_ids.is_empty() {
                return Ok((Vec::new(), 0));
            }
            query = query.filter(content::Column::Id.is_in(content_ids));
        }

        let total = query.clone().count(&*self.db).await?;
        let items = query
            .order_by_desc(content::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;

        Ok((items, total))
    }

    /// Finds a non-deleted content row by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<content::Model>> {
        let item = Content::find_by_id(id)
            .filter(content::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(item)
    }

    /// Finds a non-deleted content row by slug. Drafts (and every other
    /// non-published status) are only visible with `include_drafts`.
    pub async fn find_by_slug(
        &self,
        slug: &str,
        include_drafts: bool,
    ) -> Result<Option<content::Model>> {
        let mut query = Content::find()
            .filter(content::Column::Slug.eq(slug))
            .filter(content::Column::DeletedAt.is_null());

        if !include_drafts {
            query = query.filter(content::Column::Status.eq(ContentStatus::Published));
        }

        let item = query.one(&*self.db).await?;
        Ok(item)
    }

    /// Creates a content document and attaches its tags.
    pub async fn create(&self, input: NewContent) -> Result<content::Model> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let model = content::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            slug: Set(input.slug),
            reading_time: Set(reading_time_minutes(&input.body)),
            body: Set(input.body),
            content_type: Set(input.content_type),
            status: Set(input.status),
            published_at: Set(match input.status {
                ContentStatus::Published => Some(now.into()),
                _ => None,
            }),
            excerpt: Set(input.excerpt),
            featured_image: Set(input.featured_image),
            author_id: Set(input.author_id),
            category_id: Set(input.category_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
        }
        .insert(&txn)
        .await?;

        Self::replace_tags(&txn, model.id, &input.tag_ids).await?;

        txn.commit().await?;
        Ok(model)
    }

    /// Applies a partial update. A version snapshot of the prior state is
    /// inserted in the same transaction, so either both persist or neither.
    pub async fn update(
        &self,
        id: Uuid,
        changes: ContentChanges,
    ) -> Result<Option<content::Model>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Content::find_by_id(id)
            .filter(content::Column::DeletedAt.is_null())
            .one(&txn)
            .await?
        else {
            txn.rollback().await?;
            return Ok(None);
        };

        Self::snapshot(&txn, &existing).await?;

        let now = Utc::now();
        let mut active: content::ActiveModel = existing.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(slug) = changes.slug {
            active.slug = Set(slug);
        }
        if let Some(body) = changes.body {
            active.reading_time = Set(reading_time_minutes(&body));
            active.body = Set(body);
        }
        if let Some(content_type) = changes.content_type {
            active.content_type = Set(content_type);
        }
        if let Some(status) = changes.status {
            if status == ContentStatus::Published {
                active.published_at = Set(Some(now.into()));
            }
            active.status = Set(status);
        }
        if let Some(excerpt) = changes.excerpt {
            active.excerpt = Set(excerpt);
        }
        if let Some(featured_image) = changes.featured_image {
            active.featured_image = Set(featured_image);
        }
        if let Some(category_id) = changes.category_id {
            active.category_id = Set(category_id);
        }
        active.updated_at = Set(now.into());

        let updated = active.update(&txn).await?;

        if let Some(ref tag_ids) = changes.tag_ids {
            Self::replace_tags(&txn, updated.id, tag_ids).await?;
        }

        txn.commit().await?;
        Ok(Some(updated))
    }

    /// Marks a content row as published, stamping `published_at`.
    pub async fn publish(&self, id: Uuid) -> Result<Option<content::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let mut active: content::ActiveModel = existing.into();
        active.status = Set(ContentStatus::Published);
        active.published_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());

        Ok(Some(active.update(&*self.db).await?))
    }

    /// Reverts a content row to draft. `published_at` is left untouched as a
    /// record that the document was once live.
    pub async fn unpublish(&self, id: Uuid) -> Result<Option<content::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: content::ActiveModel = existing.into();
        active.status = Set(ContentStatus::Draft);
        active.updated_at = Set(Utc::now().into());

        Ok(Some(active.update(&*self.db).await?))
    }

    /// Soft-deletes a content row. Returns false when no live row matched.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(false);
        };

        let mut active: content::ActiveModel = existing.into();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.update(&*self.db).await?;
        Ok(true)
    }

    /// Lists version snapshots for a content row, newest first.
    pub async fn list_versions(&self, content_id: Uuid) -> Result<Vec<content_version::Model>> {
        let versions = ContentVersion::find()
            .filter(content_version::Column::ContentId.eq(content_id))
            .order_by_desc(content_version::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(versions)
    }

    /// Tags currently attached to a content row.
    pub async fn tags_for(&self, content_id: Uuid) -> Result<Vec<tag::Model>> {
        let Some(item) = self.find_by_id(content_id).await? else {
            return Ok(Vec::new());
        };
        let tags = item.find_related(Tag).all(&*self.db).await?;
        Ok(tags)
    }

    /// Published, non-deleted content for the sitemap, ordered
    /// `created_at DESC, id ASC` so repeated renders are byte-identical.
    pub async fn list_published(&self) -> Result<Vec<content::Model>> {
        let items = Content::find()
            .filter(content::Column::DeletedAt.is_null())
            .filter(content::Column::Status.eq(ContentStatus::Published))
            .order_by_desc(content::Column::CreatedAt)
            .order_by_asc(content::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(items)
    }

    async fn snapshot(txn: &DatabaseTransaction, existing: &content::Model) -> Result<()> {
        content_version::ActiveModel {
            id: Set(Uuid::new_v4()),
            content_id: Set(existing.id),
            title: Set(existing.title.clone()),
            body: Set(existing.body.clone()),
            excerpt: Set(existing.excerpt.clone()),
            metadata: Set(Some(json!({
                "status": existing.status,
                "contentType": existing.content_type,
                "slug": existing.slug,
                "publishedAt": existing.published_at.map(|dt| dt.to_rfc3339()),
            }))),
            created_at: Set(Utc::now().into()),
        }
        .insert(txn)
        .await?;
        Ok(())
    }

    /// Resolves a category by id (live rows only).
    pub async fn find_category(&self, id: Uuid) -> Result<Option<category::Model>> {
        let found = Category::find_by_id(id)
            .filter(category::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(found)
    }

    /// Resolves the subset of `tag_ids` that exist as live tags.
    pub async fn resolve_tags(&self, tag_ids: &[Uuid]) -> Result<Vec<tag::Model>> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }
        let tags = Tag::find()
            .filter(tag::Column::Id.is_in(tag_ids.to_vec()))
            .filter(tag::Column::DeletedAt.is_null())
            .all(&*self.db)
            .await?;
        Ok(tags)
    }

    /// Replaces the tag set: join rows are rebuilt from the provided ids;
    /// ids that resolve to no live tag are skipped.
    async fn replace_tags(
        txn: &DatabaseTransaction,
        content_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<()> {
        ContentTag::delete_many()
            .filter(content_tag::Column::ContentId.eq(content_id))
            .exec(txn)
            .await?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let valid = Tag::find()
            .filter(tag::Column::Id.is_in(tag_ids.to_vec()))
            .filter(tag::Column::DeletedAt.is_null())
            .all(txn)
            .await?;

        for tag in valid {
            content_tag::ActiveModel {
                content_id: Set(content_id),
                tag_id: Set(tag.id),
            }
            .insert(txn)
            .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_time_minutes(""), 0);
        assert_eq!(reading_time_minutes("one two three"), 1);
        let two_hundred = vec!["word"; 200].join(" ");
        assert_eq!(reading_time_minutes(&two_hundred), 1);
        let two_hundred_one = vec!["word"; 201].join(" ");
        assert_eq!(reading_time_minutes(&two_hundred_one), 2);
    }
}
