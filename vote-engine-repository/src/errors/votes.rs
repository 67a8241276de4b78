//! Error types for the vote store.
//! Defines specific errors that can occur during database operations on the
//! vote ledger and its derived counters.
use thiserror::Error;

/// Represents errors that can occur within the vote store.
///
/// This enum consolidates various error conditions specific to database
/// interactions, such as SQLx errors during ledger operations and decode
/// guards for stored codes.
#[derive(Debug, Error)]
pub enum VoteStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Vote not found")]
    VoteNotFound,

    #[error("Invalid vote value code: {0}")]
    InvalidVoteValue(i16),

    #[error("Invalid target kind code: {0}")]
    InvalidTargetKind(i16),
}
