//! Error types for the realtime notifier.
use thiserror::Error;
use vote_engine_realtime::BroadcastError;
use vote_engine_repository::NotificationsRepositoryError;

/// Represents errors during post-commit notification persistence or
/// broadcast. These never undo the committed vote they follow.
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("Notification persistence error: {0}")]
    Persistence(#[from] NotificationsRepositoryError),

    #[error("Broadcast error: {0}")]
    Broadcast(#[from] BroadcastError),

    #[error("Payload encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
