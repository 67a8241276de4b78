//! This module defines the `NotificationsRepository` trait, the interface
//! for persisting and reading user notifications.
use vote_engine_shared::types::{NewNotification, Notification};

use crate::errors::NotificationsRepositoryError;

/// A trait that defines the interface for the notifications store.
///
/// Notifications are created by the vote and comment flows as side
/// effects; recipients read them, count unread ones, and flip the read
/// flag. Nothing in this core deletes them.
#[async_trait::async_trait]
pub trait NotificationsRepository: Send + Sync {
    /// Persists a new notification and returns the stored row.
    async fn create(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, NotificationsRepositoryError>;

    /// Returns the recipient's notifications, newest first.
    async fn find_by_recipient(
        &self,
        recipient_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, NotificationsRepositoryError>;

    /// Counts the recipient's unread notifications.
    async fn unread_count(&self, recipient_id: i64) -> Result<i64, NotificationsRepositoryError>;

    /// Marks a notification as read on behalf of its recipient.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationsRepositoryError::NotFound`] when the row does
    /// not exist or belongs to a different recipient; the two cases are
    /// deliberately indistinguishable to the caller.
    async fn mark_read(
        &self,
        notification_id: i64,
        recipient_id: i64,
    ) -> Result<Notification, NotificationsRepositoryError>;
}
