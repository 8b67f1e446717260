//! Repository for the `list_shares` table.

use colist_core::types::DbId;
use sqlx::PgPool;

use crate::models::share::{ListRole, ListShare, ShareWithUser};

const COLUMNS: &str = "id, list_id, user_id, role, created_at";

/// Provides CRUD operations for list shares.
pub struct ShareRepo;

impl ShareRepo {
    /// Grant `user_id` editor access to `list_id`. The unique constraint
    /// `uq_list_shares_list_user` rejects a duplicate grant under contention.
    pub async fn create(
        pool: &PgPool,
        list_id: DbId,
        user_id: DbId,
    ) -> Result<ListShare, sqlx::Error> {
        let query = format!(
            "INSERT INTO list_shares (list_id, user_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ListShare>(&query)
            .bind(list_id)
            .bind(user_id)
            .bind(ListRole::Editor)
            .fetch_one(pool)
            .await
    }

    /// Find the share row for `(list_id, user_id)`, if any.
    pub async fn find(
        pool: &PgPool,
        list_id: DbId,
        user_id: DbId,
    ) -> Result<Option<ListShare>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM list_shares WHERE list_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, ListShare>(&query)
            .bind(list_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Number of shares currently held by a list.
    pub async fn count_for_list(pool: &PgPool, list_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM list_shares WHERE list_id = $1")
            .bind(list_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// All shares of a list joined with the grantee's identity.
    pub async fn list_with_users(
        pool: &PgPool,
        list_id: DbId,
    ) -> Result<Vec<ShareWithUser>, sqlx::Error> {
        sqlx::query_as::<_, ShareWithUser>(
            "SELECT s.id, s.user_id, u.name AS user_name, u.login AS user_login,
                    s.role, s.created_at
             FROM list_shares s
             INNER JOIN users u ON u.id = s.user_id
             WHERE s.list_id = $1
             ORDER BY s.created_at",
        )
        .bind(list_id)
        .fetch_all(pool)
        .await
    }

    /// Revoke a grant. Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        list_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM list_shares WHERE list_id = $1 AND user_id = $2")
            .bind(list_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
