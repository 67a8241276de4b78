use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::VoteTarget;

/// Represents the value of a vote cast by a user.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum VoteValue {
    /// Indicates an upvote or positive endorsement.
    Up,
    /// Indicates a downvote or negative endorsement.
    Down,
}

impl VoteValue {
    /// Returns the signed integer contribution of this vote (+1 or -1).
    pub fn value(&self) -> i64 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }

    /// Parses a client-supplied signed value. Anything outside {+1, -1}
    /// is rejected.
    pub fn from_value(value: i64) -> Option<VoteValue> {
        match value {
            1 => Some(VoteValue::Up),
            -1 => Some(VoteValue::Down),
            _ => None,
        }
    }

    /// Storage code for the `votes.value` column.
    pub fn code(&self) -> i16 {
        self.value() as i16
    }

    /// Decodes a storage code back into a vote value.
    pub fn from_code(code: i16) -> Option<VoteValue> {
        VoteValue::from_value(code as i64)
    }
}

/// Represents a single row of the vote ledger.
///
/// At most one record exists per (user, target) pair; the ledger is the
/// authoritative source the denormalized counts are recomputed from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteRecord {
    pub user_id: i64,
    pub target: VoteTarget,
    pub value: VoteValue,
    pub voted_at: DateTime<Utc>,
}

/// Outcome of a ledger upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// `true` when the upsert inserted a fresh row rather than updating
    /// an existing one.
    pub was_new: bool,
}

/// Summary of a committed vote or unvote operation.
///
/// Reports the state the transaction left behind: the recomputed aggregate
/// on the target, the target owner, and the karma delta actually applied
/// (zero for self-votes and same-value revotes).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteReceipt {
    pub target: VoteTarget,
    pub vote_count: i64,
    pub owner_id: i64,
    pub karma_delta: i64,
}
