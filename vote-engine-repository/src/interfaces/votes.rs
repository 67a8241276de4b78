//! This module defines the `VoteStore` and `VoteUnit` traits, the interface
//! to the vote ledger and the shared counters kept consistent with it.
//! It abstracts the database operations for persistence and retrieval.
use vote_engine_shared::types::{UpsertOutcome, VoteRecord, VoteTarget, VoteValue};

use crate::errors::VoteStoreError;

/// A trait that defines the entry points into vote storage.
///
/// Implementors hand out one-transaction [`VoteUnit`]s for mutating
/// operations, and serve untransacted reads directly.
#[async_trait::async_trait]
pub trait VoteStore: Send + Sync {
    /// Opens a transaction scoped to a single vote or unvote operation.
    ///
    /// Every mutation performed through the returned unit becomes visible
    /// atomically on [`VoteUnit::commit`], or not at all.
    async fn begin(&self) -> Result<Box<dyn VoteUnit>, VoteStoreError>;

    /// Reads the current vote for a (user, target) pair outside any
    /// transaction. Returns `None` when the user has not voted; never
    /// fabricates a default vote.
    async fn get_vote(
        &self,
        user_id: i64,
        target: &VoteTarget,
    ) -> Result<Option<VoteRecord>, VoteStoreError>;
}

/// One open transaction over the ledger and the counters derived from it.
///
/// The unit exposes the individual steps of a vote operation so the caller
/// owns their sequencing; it does not decide policy (when karma moves, what
/// a delta is) itself. Dropping a unit without committing discards its
/// writes.
#[async_trait::async_trait]
pub trait VoteUnit: Send {
    /// Reads the current vote for the pair, locking the row for the rest
    /// of the transaction so concurrent votes on the same pair serialize.
    async fn get_vote(
        &mut self,
        user_id: i64,
        target: &VoteTarget,
    ) -> Result<Option<VoteRecord>, VoteStoreError>;

    /// Inserts or updates the ledger row for the pair. Re-applying the
    /// same value is an ordinary update, not a skip.
    async fn upsert_vote(
        &mut self,
        user_id: i64,
        target: &VoteTarget,
        value: VoteValue,
    ) -> Result<UpsertOutcome, VoteStoreError>;

    /// Deletes the ledger row for the pair and returns the value it held.
    ///
    /// # Errors
    ///
    /// Returns [`VoteStoreError::VoteNotFound`] when no row exists; the
    /// missing row is surfaced, never swallowed.
    async fn delete_vote(
        &mut self,
        user_id: i64,
        target: &VoteTarget,
    ) -> Result<VoteValue, VoteStoreError>;

    /// Recomputes the target's denormalized vote count from the ledger and
    /// writes it back unconditionally.
    ///
    /// The full `SUM` recompute self-heals any prior drift and is
    /// insensitive to whether the preceding mutation was an insert, update,
    /// or delete. Returns `None` when the target row does not exist.
    async fn recompute_count(&mut self, target: &VoteTarget) -> Result<Option<i64>, VoteStoreError>;

    /// Looks up the owner of the target. Returns `None` when the named
    /// post or comment does not exist.
    async fn find_owner(&mut self, target: &VoteTarget) -> Result<Option<i64>, VoteStoreError>;

    /// Applies a signed delta to the user's karma counter in place; never
    /// reads-then-writes, so concurrent adjustments cannot lose updates.
    async fn increment_karma(&mut self, user_id: i64, delta: i64) -> Result<(), VoteStoreError>;

    /// Commits every mutation performed through this unit.
    async fn commit(self: Box<Self>) -> Result<(), VoteStoreError>;

    /// Discards every mutation performed through this unit.
    async fn rollback(self: Box<Self>) -> Result<(), VoteStoreError>;
}
