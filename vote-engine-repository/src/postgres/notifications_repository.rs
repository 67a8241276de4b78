//! PostgreSQL implementation of the notifications repository.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;
use vote_engine_shared::types::{NewNotification, Notification, NotificationKind};

use crate::errors::NotificationsRepositoryError;
use crate::interfaces::NotificationsRepository;

/// PostgreSQL-backed notifications repository.
pub struct PostgresNotificationsRepository {
    pool: sqlx::PgPool,
}

impl PostgresNotificationsRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

fn decode_notification_row(row: &PgRow) -> Result<Notification, NotificationsRepositoryError> {
    let kind: String = row.try_get("kind")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(Notification {
        id: row.try_get("id")?,
        recipient_id: row.try_get("recipient_id")?,
        sender_id: row.try_get("sender_id")?,
        post_id: row.try_get("post_id")?,
        comment_id: row.try_get("comment_id")?,
        kind: NotificationKind::from_str_code(&kind)
            .ok_or(NotificationsRepositoryError::InvalidKind(kind))?,
        read: row.try_get("read")?,
        created_at,
    })
}

#[async_trait]
impl NotificationsRepository for PostgresNotificationsRepository {
    async fn create(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, NotificationsRepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO notifications (recipient_id, sender_id, post_id, comment_id, kind)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, recipient_id, sender_id, post_id, comment_id, kind, read, created_at
            "#,
        )
        .bind(notification.recipient_id)
        .bind(notification.sender_id)
        .bind(notification.post_id)
        .bind(notification.comment_id)
        .bind(notification.kind.as_str())
        .fetch_one(&self.pool)
        .await?;

        decode_notification_row(&row)
    }

    async fn find_by_recipient(
        &self,
        recipient_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, NotificationsRepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, recipient_id, sender_id, post_id, comment_id, kind, read, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(recipient_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(decode_notification_row).collect()
    }

    async fn unread_count(&self, recipient_id: i64) -> Result<i64, NotificationsRepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM notifications
            WHERE recipient_id = $1 AND read = FALSE
            "#,
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn mark_read(
        &self,
        notification_id: i64,
        recipient_id: i64,
    ) -> Result<Notification, NotificationsRepositoryError> {
        // The recipient filter makes "someone else's notification" and
        // "no such notification" the same observable outcome.
        let row = sqlx::query(
            r#"
            UPDATE notifications SET read = TRUE
            WHERE id = $1 AND recipient_id = $2
            RETURNING id, recipient_id, sender_id, post_id, comment_id, kind, read, created_at
            "#,
        )
        .bind(notification_id)
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(NotificationsRepositoryError::NotFound)?;

        decode_notification_row(&row)
    }
}
