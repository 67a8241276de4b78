//! Error types for the vote engine repository.
//! Consolidates and re-exports error types related to repository operations.
mod notifications;
mod votes;

pub use notifications::NotificationsRepositoryError;
pub use votes::VoteStoreError;
