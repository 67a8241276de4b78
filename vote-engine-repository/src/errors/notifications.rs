//! Error types for the notifications repository.
use thiserror::Error;

/// Represents errors that can occur within the notifications repository.
#[derive(Debug, Error)]
pub enum NotificationsRepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Notification not found")]
    NotFound,

    #[error("Invalid notification kind: {0}")]
    InvalidKind(String),
}
