//! Repository for the `categories` table (personal and local scope).

use colist_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryRef};

const COLUMNS: &str = "id, user_id, name, icon, list_id, created_at";

/// Provides CRUD operations for categories across both scopes.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a personal-scope category. The partial unique index
    /// `uq_categories_personal_name` rejects duplicates under contention.
    pub async fn create_personal(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        icon: &str,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (user_id, name, icon, list_id)
             VALUES ($1, $2, $3, NULL)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(name)
            .bind(icon)
            .fetch_one(pool)
            .await
    }

    /// Insert a local-scope category tied to `list_id`, created by `user_id`.
    pub async fn create_local(
        pool: &PgPool,
        user_id: DbId,
        list_id: DbId,
        name: &str,
        icon: &str,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (user_id, name, icon, list_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(name)
            .bind(icon)
            .bind(list_id)
            .fetch_one(pool)
            .await
    }

    /// A user's personal categories, ordered by name.
    pub async fn list_personal(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE user_id = $1 AND list_id IS NULL
             ORDER BY name"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Categories visible within a list: the union of the author's personal
    /// categories and the list's local categories, ordered by name.
    pub async fn list_for_list(
        pool: &PgPool,
        list_id: DbId,
        author_id: DbId,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE (user_id = $2 AND list_id IS NULL) OR list_id = $1
             ORDER BY name"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(list_id)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Find a personal-scope category owned by `user_id`.
    pub async fn find_personal(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE id = $1 AND user_id = $2 AND list_id IS NULL"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a personal-scope category owned by `user_id` with the given name.
    pub async fn find_personal_by_name(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE user_id = $1 AND name = $2 AND list_id IS NULL"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Find a local-scope category belonging to `list_id`.
    pub async fn find_local(
        pool: &PgPool,
        id: DbId,
        list_id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories WHERE id = $1 AND list_id = $2"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(list_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a local-scope category on `list_id` with the given name.
    pub async fn find_local_by_name(
        pool: &PgPool,
        list_id: DbId,
        name: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories WHERE list_id = $1 AND name = $2"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(list_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Update a category's name and/or icon. Only non-`None` fields change.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        icon: Option<&str>,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE($2, name),
                icon = COALESCE($3, icon)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(name)
            .bind(icon)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category, clearing the `(category_id, category_type)` pair
    /// on items that referenced it, in one transaction. Returns `true` if a
    /// row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE list_items SET category_id = NULL, category_type = NULL
             WHERE category_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether `category` may be assigned to an item on the list owned by
    /// `author_id`.
    ///
    /// A personal reference is valid only when the category belongs to the
    /// list's author (not merely to the caller); a local reference is valid
    /// only when the category is tied to this exact list.
    pub async fn validate_for_list(
        pool: &PgPool,
        category: CategoryRef,
        list_id: DbId,
        author_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        match category {
            CategoryRef::Personal(id) => {
                sqlx::query_scalar(
                    "SELECT EXISTS (
                        SELECT 1 FROM categories
                        WHERE id = $1 AND user_id = $2 AND list_id IS NULL
                     )",
                )
                .bind(id)
                .bind(author_id)
                .fetch_one(pool)
                .await
            }
            CategoryRef::Local(id) => {
                sqlx::query_scalar(
                    "SELECT EXISTS (
                        SELECT 1 FROM categories WHERE id = $1 AND list_id = $2
                     )",
                )
                .bind(id)
                .bind(list_id)
                .fetch_one(pool)
                .await
            }
        }
    }
}
