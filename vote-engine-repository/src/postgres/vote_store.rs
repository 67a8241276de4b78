//! PostgreSQL implementation of the vote store.
//!
//! Provides the production backend for the `VoteStore`/`VoteUnit` traits
//! with connection pooling and transaction safety.
//!
//! ## Database Tables
//!
//! - `votes`: the ledger, one row per (user, target) pair
//! - `posts` / `comments`: carry the denormalized `vote_count`
//! - `users`: carry the `karma` counter
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;
use vote_engine_shared::types::{TargetKind, UpsertOutcome, VoteRecord, VoteTarget, VoteValue};

use crate::errors::VoteStoreError;
use crate::interfaces::{VoteStore, VoteUnit};

/// PostgreSQL implementation of the vote store.
///
/// Mutating operations run through [`PostgresVoteUnit`], which wraps one
/// `sqlx` transaction; the untransacted read path goes straight to the
/// pool.
pub struct PostgresVoteStore {
    pool: sqlx::PgPool,
}

impl PostgresVoteStore {
    /// Creates a new PostgreSQL vote store over a configured pool with the
    /// required schema.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

fn decode_vote_row(row: &PgRow) -> Result<VoteRecord, VoteStoreError> {
    let kind_code: i16 = row.try_get("target_kind")?;
    let value_code: i16 = row.try_get("value")?;
    let voted_at: DateTime<Utc> = row.try_get("voted_at")?;

    Ok(VoteRecord {
        user_id: row.try_get("user_id")?,
        target: VoteTarget {
            kind: TargetKind::from_code(kind_code)
                .ok_or(VoteStoreError::InvalidTargetKind(kind_code))?,
            id: row.try_get("target_id")?,
        },
        value: VoteValue::from_code(value_code)
            .ok_or(VoteStoreError::InvalidVoteValue(value_code))?,
        voted_at,
    })
}

#[async_trait]
impl VoteStore for PostgresVoteStore {
    async fn begin(&self) -> Result<Box<dyn VoteUnit>, VoteStoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostgresVoteUnit { tx }))
    }

    async fn get_vote(
        &self,
        user_id: i64,
        target: &VoteTarget,
    ) -> Result<Option<VoteRecord>, VoteStoreError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, target_kind, target_id, value, voted_at
            FROM votes
            WHERE user_id = $1 AND target_kind = $2 AND target_id = $3
            "#,
        )
        .bind(user_id)
        .bind(target.kind.code())
        .bind(target.id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(decode_vote_row).transpose()
    }
}

/// One open transaction against the voting schema.
pub struct PostgresVoteUnit {
    tx: sqlx::Transaction<'static, sqlx::Postgres>,
}

#[async_trait]
impl VoteUnit for PostgresVoteUnit {
    async fn get_vote(
        &mut self,
        user_id: i64,
        target: &VoteTarget,
    ) -> Result<Option<VoteRecord>, VoteStoreError> {
        // FOR UPDATE serializes concurrent operations on the same pair for
        // the remainder of the transaction.
        let row = sqlx::query(
            r#"
            SELECT user_id, target_kind, target_id, value, voted_at
            FROM votes
            WHERE user_id = $1 AND target_kind = $2 AND target_id = $3
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(target.kind.code())
        .bind(target.id)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.as_ref().map(decode_vote_row).transpose()
    }

    async fn upsert_vote(
        &mut self,
        user_id: i64,
        target: &VoteTarget,
        value: VoteValue,
    ) -> Result<UpsertOutcome, VoteStoreError> {
        // xmax = 0 only holds for rows created by this statement, which
        // distinguishes the insert arm from the conflict-update arm.
        let row = sqlx::query(
            r#"
            INSERT INTO votes (user_id, target_kind, target_id, value, voted_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (user_id, target_kind, target_id)
            DO UPDATE SET
                value = EXCLUDED.value,
                voted_at = EXCLUDED.voted_at
            RETURNING (xmax = 0) AS was_new
            "#,
        )
        .bind(user_id)
        .bind(target.kind.code())
        .bind(target.id)
        .bind(value.code())
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(UpsertOutcome {
            was_new: row.try_get("was_new")?,
        })
    }

    async fn delete_vote(
        &mut self,
        user_id: i64,
        target: &VoteTarget,
    ) -> Result<VoteValue, VoteStoreError> {
        let row = sqlx::query(
            r#"
            DELETE FROM votes
            WHERE user_id = $1 AND target_kind = $2 AND target_id = $3
            RETURNING value
            "#,
        )
        .bind(user_id)
        .bind(target.kind.code())
        .bind(target.id)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or(VoteStoreError::VoteNotFound)?;

        let code: i16 = row.try_get("value")?;
        VoteValue::from_code(code).ok_or(VoteStoreError::InvalidVoteValue(code))
    }

    async fn recompute_count(&mut self, target: &VoteTarget) -> Result<Option<i64>, VoteStoreError> {
        let sql = match target.kind {
            TargetKind::Post => {
                r#"
                UPDATE posts SET vote_count = (
                    SELECT COALESCE(SUM(value), 0) FROM votes
                    WHERE target_kind = $1 AND target_id = $2
                ) WHERE id = $2
                RETURNING vote_count
                "#
            }
            TargetKind::Comment => {
                r#"
                UPDATE comments SET vote_count = (
                    SELECT COALESCE(SUM(value), 0) FROM votes
                    WHERE target_kind = $1 AND target_id = $2
                ) WHERE id = $2
                RETURNING vote_count
                "#
            }
        };

        let row = sqlx::query(sql)
            .bind(target.kind.code())
            .bind(target.id)
            .fetch_optional(&mut *self.tx)
            .await?;

        row.map(|r| r.try_get("vote_count")).transpose().map_err(Into::into)
    }

    async fn find_owner(&mut self, target: &VoteTarget) -> Result<Option<i64>, VoteStoreError> {
        let sql = match target.kind {
            TargetKind::Post => "SELECT user_id FROM posts WHERE id = $1",
            TargetKind::Comment => "SELECT user_id FROM comments WHERE id = $1",
        };

        let owner: Option<i64> = sqlx::query_scalar(sql)
            .bind(target.id)
            .fetch_optional(&mut *self.tx)
            .await?;

        Ok(owner)
    }

    async fn increment_karma(&mut self, user_id: i64, delta: i64) -> Result<(), VoteStoreError> {
        sqlx::query("UPDATE users SET karma = karma + $1 WHERE id = $2")
            .bind(delta)
            .bind(user_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), VoteStoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), VoteStoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
