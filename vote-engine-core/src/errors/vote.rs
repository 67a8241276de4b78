//! Error types for the vote orchestrator.
use thiserror::Error;
use vote_engine_repository::VoteStoreError;
use vote_engine_shared::types::AddressingError;

use crate::errors::NotifierError;

/// Represents the failures a vote, unvote, or vote lookup can surface.
///
/// Validation variants are raised before any I/O; storage failures after
/// the transaction opens roll it back and propagate unwrapped. The
/// `Notification` variant is special: it reports a post-commit failure, so
/// the vote itself is durably recorded even though the request errors.
#[derive(Debug, Error)]
pub enum VoteError {
    #[error("Invalid vote value: {0}")]
    InvalidVoteValue(i64),

    #[error("Must specify exactly one of postId or commentId")]
    InvalidAddressing,

    #[error("No such post id or comment id")]
    TargetNotFound,

    #[error("Vote not found")]
    VoteNotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] VoteStoreError),

    #[error("Notification error: {0}")]
    Notification(#[from] NotifierError),
}

impl From<AddressingError> for VoteError {
    fn from(_: AddressingError) -> Self {
        VoteError::InvalidAddressing
    }
}
