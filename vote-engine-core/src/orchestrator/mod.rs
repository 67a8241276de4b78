//! This module defines the `VoteOrchestrator`, the transaction boundary of
//! the voting engine.
//! It sequences the ledger mutation, the aggregate recompute, and the karma
//! adjustment inside one storage transaction, then hands the committed
//! outcome to the realtime notifier.
use std::sync::Arc;

use tracing::{debug, warn};
use vote_engine_repository::{VoteStore, VoteStoreError, VoteUnit};
use vote_engine_shared::types::{TargetRef, VoteReceipt, VoteRecord, VoteTarget, VoteValue};

use crate::errors::VoteError;
use crate::notifier::RealtimeNotifier;

/// The signed karma contribution of moving a user's vote from `previous`
/// to `next`: the full value for a first vote, the difference on a change.
/// Flipping +1 to -1 therefore yields -2; re-applying the same value
/// yields 0.
fn karma_delta(previous: Option<VoteValue>, next: VoteValue) -> i64 {
    match previous {
        Some(previous) => next.value() - previous.value(),
        None => next.value(),
    }
}

/// `VoteOrchestrator` is responsible for coordinating every vote, unvote,
/// and vote lookup.
///
/// Each mutating operation validates its input before any I/O, then runs
/// ledger write, aggregate recompute, and karma adjustment through a single
/// [`VoteUnit`] transaction. Any failure after the transaction opens rolls
/// it back and propagates the original error unwrapped. The notifier runs
/// only after a successful commit and can never undo it.
pub struct VoteOrchestrator {
    store: Arc<dyn VoteStore>,
    notifier: RealtimeNotifier,
}

impl VoteOrchestrator {
    pub fn new(store: Arc<dyn VoteStore>, notifier: RealtimeNotifier) -> Self {
        Self { store, notifier }
    }

    /// Casts or changes a vote.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The voting user
    /// * `target` - Request addressing naming exactly one of post/comment
    /// * `value` - The signed vote value, +1 or -1
    ///
    /// # Returns
    ///
    /// A [`VoteReceipt`] describing the committed outcome, or a
    /// [`VoteError`] naming the violated precondition or the underlying
    /// failure.
    pub async fn vote(
        &self,
        user_id: i64,
        target: TargetRef,
        value: i64,
    ) -> Result<VoteReceipt, VoteError> {
        // Both validations run before a transaction opens; malformed input
        // never costs transactional work.
        let value = VoteValue::from_value(value).ok_or(VoteError::InvalidVoteValue(value))?;
        let target = target.resolve()?;

        let mut unit = self.store.begin().await?;
        let receipt = match Self::apply_vote(unit.as_mut(), user_id, target, value).await {
            Ok(receipt) => receipt,
            Err(error) => {
                if let Err(rollback_error) = unit.rollback().await {
                    warn!(error = %rollback_error, "Rollback failed after vote error");
                }
                return Err(error);
            }
        };
        unit.commit().await?;

        debug!(
            user_id,
            target = ?receipt.target,
            vote_count = receipt.vote_count,
            karma_delta = receipt.karma_delta,
            "Vote committed"
        );

        self.notifier
            .vote_applied(user_id, receipt.target, value, receipt.owner_id)
            .await?;

        Ok(receipt)
    }

    /// Withdraws an existing vote.
    ///
    /// Fails with [`VoteError::VoteNotFound`] when the user has no vote on
    /// the target; nothing is mutated in that case.
    pub async fn remove_vote(
        &self,
        user_id: i64,
        target: TargetRef,
    ) -> Result<VoteReceipt, VoteError> {
        let target = target.resolve()?;

        let mut unit = self.store.begin().await?;
        let receipt = match Self::apply_removal(unit.as_mut(), user_id, target).await {
            Ok(receipt) => receipt,
            Err(error) => {
                if let Err(rollback_error) = unit.rollback().await {
                    warn!(error = %rollback_error, "Rollback failed after unvote error");
                }
                return Err(error);
            }
        };
        unit.commit().await?;

        debug!(
            user_id,
            target = ?receipt.target,
            vote_count = receipt.vote_count,
            karma_delta = receipt.karma_delta,
            "Vote removal committed"
        );

        self.notifier.vote_removed(user_id, receipt.target).await?;

        Ok(receipt)
    }

    /// Reads the user's current vote on the target. A pure lookup: no
    /// transaction, and an absent vote is `None`, never a fabricated zero.
    pub async fn get_vote(
        &self,
        user_id: i64,
        target: TargetRef,
    ) -> Result<Option<VoteRecord>, VoteError> {
        let target = target.resolve()?;
        Ok(self.store.get_vote(user_id, &target).await?)
    }

    async fn apply_vote(
        unit: &mut dyn VoteUnit,
        user_id: i64,
        target: VoteTarget,
        value: VoteValue,
    ) -> Result<VoteReceipt, VoteError> {
        let existing = unit.get_vote(user_id, &target).await?;
        unit.upsert_vote(user_id, &target, value).await?;

        let vote_count = unit
            .recompute_count(&target)
            .await?
            .ok_or(VoteError::TargetNotFound)?;
        let owner_id = unit
            .find_owner(&target)
            .await?
            .ok_or(VoteError::TargetNotFound)?;

        let mut applied_delta = 0;
        if owner_id != user_id {
            applied_delta = karma_delta(existing.map(|record| record.value), value);
            unit.increment_karma(owner_id, applied_delta).await?;
        }

        Ok(VoteReceipt {
            target,
            vote_count,
            owner_id,
            karma_delta: applied_delta,
        })
    }

    async fn apply_removal(
        unit: &mut dyn VoteUnit,
        user_id: i64,
        target: VoteTarget,
    ) -> Result<VoteReceipt, VoteError> {
        if unit.get_vote(user_id, &target).await?.is_none() {
            return Err(VoteError::VoteNotFound);
        }

        let previous = unit.delete_vote(user_id, &target).await.map_err(|error| match error {
            VoteStoreError::VoteNotFound => VoteError::VoteNotFound,
            other => VoteError::Storage(other),
        })?;

        let vote_count = unit
            .recompute_count(&target)
            .await?
            .ok_or(VoteError::TargetNotFound)?;
        let owner_id = unit
            .find_owner(&target)
            .await?
            .ok_or(VoteError::TargetNotFound)?;

        let mut applied_delta = 0;
        if owner_id != user_id {
            applied_delta = -previous.value();
            unit.increment_karma(owner_id, applied_delta).await?;
        }

        Ok(VoteReceipt {
            target,
            vote_count,
            owner_id,
            karma_delta: applied_delta,
        })
    }
}
