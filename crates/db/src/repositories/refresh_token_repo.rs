//! Repository for the `refresh_tokens` table.
//!
//! Tokens are single-use: every successful refresh deletes the presented
//! row and inserts a replacement inside one transaction, so a crash (or a
//! concurrent replay) can never leave both generations valid.

use colist_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::refresh_token::RefreshToken;

const COLUMNS: &str = "id, token_hash, user_id, expires_at, created_at";

/// Provides storage operations for refresh tokens (stored as SHA-256 digests).
pub struct RefreshTokenRepo;

impl RefreshTokenRepo {
    /// Persist a new refresh token digest for `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<RefreshToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO refresh_tokens (token_hash, user_id, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(token_hash)
            .bind(user_id)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an unexpired token row by digest.
    pub async fn find_valid(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM refresh_tokens
             WHERE token_hash = $1 AND expires_at > NOW()"
        );
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Rotate a token: delete the old digest and insert the new one in a
    /// single transaction.
    ///
    /// Returns `false` without inserting when the old digest is already
    /// gone -- the losing side of a concurrent replay.
    pub async fn rotate(
        pool: &PgPool,
        old_hash: &str,
        new_hash: &str,
        user_id: DbId,
        expires_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = $1")
            .bind(old_hash)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO refresh_tokens (token_hash, user_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(new_hash)
        .bind(user_id)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Revoke a token by digest. Returns `true` if a row was deleted.
    pub async fn delete_by_hash(pool: &PgPool, token_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
