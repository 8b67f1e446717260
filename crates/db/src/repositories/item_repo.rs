//! Repository for the `list_items` table, including position maintenance.

use colist_core::types::DbId;
use futures::future::try_join_all;
use sqlx::PgPool;

use crate::models::category::CategoryRef;
use crate::models::item::{ItemUpdate, ItemWithCategory, ListItem};

const COLUMNS: &str =
    "id, list_id, title, description, is_completed, category_id, category_type, position, created_at";

/// Item columns joined with the category's display fields.
const JOINED_COLUMNS: &str = "i.id, i.list_id, i.title, i.description, i.is_completed,
    i.category_id, i.category_type, c.name AS category_name, c.icon AS category_icon,
    i.position, i.created_at";

/// Provides CRUD and ordering operations for list items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item appended at `max(position) + 1` (or `0` for an
    /// empty list). The append position is computed inside the INSERT so
    /// no separate read is needed.
    ///
    /// Deleted positions are never reused; gaps are expected.
    pub async fn create(
        pool: &PgPool,
        list_id: DbId,
        title: &str,
        description: Option<&str>,
        category: Option<CategoryRef>,
    ) -> Result<ListItem, sqlx::Error> {
        let (category_id, category_type) = match category.map(CategoryRef::into_columns) {
            Some((id, kind)) => (Some(id), Some(kind)),
            None => (None, None),
        };

        let query = format!(
            "INSERT INTO list_items (list_id, title, description, category_id, category_type, position)
             VALUES ($1, $2, $3, $4, $5,
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM list_items WHERE list_id = $1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ListItem>(&query)
            .bind(list_id)
            .bind(title)
            .bind(description)
            .bind(category_id)
            .bind(category_type)
            .fetch_one(pool)
            .await
    }

    /// Find an item by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ListItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM list_items WHERE id = $1");
        sqlx::query_as::<_, ListItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One item joined with its category's name and icon.
    pub async fn find_with_category(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ItemWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM list_items i
             LEFT JOIN categories c ON c.id = i.category_id
             WHERE i.id = $1"
        );
        sqlx::query_as::<_, ItemWithCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All items in a list in display order, joined with category fields.
    pub async fn list_with_category(
        pool: &PgPool,
        list_id: DbId,
    ) -> Result<Vec<ItemWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM list_items i
             LEFT JOIN categories c ON c.id = i.category_id
             WHERE i.list_id = $1
             ORDER BY i.position"
        );
        sqlx::query_as::<_, ItemWithCategory>(&query)
            .bind(list_id)
            .fetch_all(pool)
            .await
    }

    /// Write the fully-resolved column values produced by merging a partial
    /// update into the current row. Returns `None` if the item is gone.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &ItemUpdate,
    ) -> Result<Option<ListItem>, sqlx::Error> {
        let (category_id, category_type) = match update.category.map(CategoryRef::into_columns) {
            Some((cat_id, kind)) => (Some(cat_id), Some(kind)),
            None => (None, None),
        };

        let query = format!(
            "UPDATE list_items SET
                title = $2,
                description = $3,
                is_completed = $4,
                category_id = $5,
                category_type = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ListItem>(&query)
            .bind(id)
            .bind(&update.title)
            .bind(&update.description)
            .bind(update.is_completed)
            .bind(category_id)
            .bind(category_type)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM list_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The subset of `ids` that currently belong to `list_id`.
    pub async fn ids_in_list(
        pool: &PgPool,
        list_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM list_items WHERE list_id = $1 AND id = ANY($2)")
            .bind(list_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Assign `position = index` for each id, as an unordered batch of
    /// independent per-row updates.
    ///
    /// Deliberately not transactional: two overlapping reorders interleave
    /// with last-write-per-row semantics, which is acceptable for a
    /// single-user-dragging UX.
    pub async fn reorder(pool: &PgPool, ids: &[DbId]) -> Result<(), sqlx::Error> {
        try_join_all(ids.iter().enumerate().map(|(index, id)| {
            sqlx::query("UPDATE list_items SET position = $2 WHERE id = $1")
                .bind(id)
                .bind(index as i32)
                .execute(pool)
        }))
        .await?;
        Ok(())
    }
}
