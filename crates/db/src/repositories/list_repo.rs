//! Repository for the `lists` table, including access resolution.

use colist_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::list::{List, ListSummary};
use crate::models::share::ListRole;

const COLUMNS: &str = "id, name, author_id, created_at";

/// One list row joined with the caller's resolved role (NULL when the
/// caller is neither the author nor a grantee).
#[derive(sqlx::FromRow)]
struct ListAccessRow {
    id: DbId,
    name: String,
    author_id: DbId,
    created_at: Timestamp,
    role: Option<ListRole>,
}

/// Per-list aggregates selected alongside the list columns.
const SUMMARY_SELECT: &str = "l.id, l.name, l.author_id, l.created_at,
    (SELECT COUNT(*) FROM list_items i WHERE i.list_id = l.id) AS items_count,
    (SELECT COUNT(*) FILTER (WHERE i.is_completed) FROM list_items i WHERE i.list_id = l.id)
        AS completed_count,
    (SELECT COUNT(*) FROM list_shares c WHERE c.list_id = l.id) AS shares_count,
    CASE WHEN l.author_id = $1 THEN 'owner'::list_role ELSE s.role END AS role";

/// Provides CRUD and access-resolution operations for lists.
pub struct ListRepo;

impl ListRepo {
    /// Insert a new list owned by `author_id`.
    pub async fn create(pool: &PgPool, author_id: DbId, name: &str) -> Result<List, sqlx::Error> {
        let query = format!(
            "INSERT INTO lists (name, author_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, List>(&query)
            .bind(name)
            .bind(author_id)
            .fetch_one(pool)
            .await
    }

    /// Find a list by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<List>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lists WHERE id = $1");
        sqlx::query_as::<_, List>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a list and resolve the caller's role in one lookup.
    ///
    /// Returns `None` when the list does not exist; the inner role is `None`
    /// when the list exists but the caller has no access. Callers must map
    /// both cases to the same NotFound error so probing cannot distinguish
    /// them.
    pub async fn find_with_access(
        pool: &PgPool,
        list_id: DbId,
        user_id: DbId,
    ) -> Result<Option<(List, Option<ListRole>)>, sqlx::Error> {
        let row = sqlx::query_as::<_, ListAccessRow>(
            "SELECT l.id, l.name, l.author_id, l.created_at,
                    CASE WHEN l.author_id = $2 THEN 'owner'::list_role ELSE s.role END AS role
             FROM lists l
             LEFT JOIN list_shares s ON s.list_id = l.id AND s.user_id = $2
             WHERE l.id = $1",
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|r| {
            (
                List {
                    id: r.id,
                    name: r.name,
                    author_id: r.author_id,
                    created_at: r.created_at,
                },
                r.role,
            )
        }))
    }

    /// Resolve the caller's role for a list: `Owner` iff the caller is the
    /// author, `Editor` iff a share row exists, `None` otherwise (including
    /// when the list itself is absent).
    pub async fn resolve_access(
        pool: &PgPool,
        list_id: DbId,
        user_id: DbId,
    ) -> Result<Option<ListRole>, sqlx::Error> {
        Ok(Self::find_with_access(pool, list_id, user_id)
            .await?
            .and_then(|(_, role)| role))
    }

    /// All lists the user owns or has been granted access to, newest first,
    /// each with item/share counts and the user's role.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ListSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_SELECT}
             FROM lists l
             LEFT JOIN list_shares s ON s.list_id = l.id AND s.user_id = $1
             WHERE l.author_id = $1 OR s.user_id IS NOT NULL
             ORDER BY l.created_at DESC"
        );
        sqlx::query_as::<_, ListSummary>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// One list with counts and the caller's role. Returns `None` when the
    /// list is absent or the caller has no access.
    pub async fn find_summary(
        pool: &PgPool,
        list_id: DbId,
        user_id: DbId,
    ) -> Result<Option<ListSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_SELECT}
             FROM lists l
             LEFT JOIN list_shares s ON s.list_id = l.id AND s.user_id = $1
             WHERE l.id = $2 AND (l.author_id = $1 OR s.user_id IS NOT NULL)"
        );
        sqlx::query_as::<_, ListSummary>(&query)
            .bind(user_id)
            .bind(list_id)
            .fetch_optional(pool)
            .await
    }

    /// Rename a list. Returns `None` if no row with the given `id` exists.
    pub async fn update_name(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<List>, sqlx::Error> {
        let query = format!("UPDATE lists SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, List>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a list. Items, shares, and local categories cascade.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
