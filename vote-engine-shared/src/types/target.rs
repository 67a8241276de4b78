use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Distinguishes the two kinds of votable content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Post,
    Comment,
}

impl TargetKind {
    /// Storage code for the `votes.target_kind` column.
    pub fn code(&self) -> i16 {
        match self {
            TargetKind::Post => 0,
            TargetKind::Comment => 1,
        }
    }

    /// Decodes a storage code back into a target kind.
    pub fn from_code(code: i16) -> Option<TargetKind> {
        match code {
            0 => Some(TargetKind::Post),
            1 => Some(TargetKind::Comment),
            _ => None,
        }
    }
}

/// The addressing key for anything that can receive votes.
///
/// A single tagged representation used uniformly across the ledger, the
/// aggregate recompute, and the karma adjustment, instead of carrying
/// parallel nullable post/comment columns through every call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VoteTarget {
    pub kind: TargetKind,
    pub id: i64,
}

impl VoteTarget {
    pub fn post(id: i64) -> VoteTarget {
        VoteTarget {
            kind: TargetKind::Post,
            id,
        }
    }

    pub fn comment(id: i64) -> VoteTarget {
        VoteTarget {
            kind: TargetKind::Comment,
            id,
        }
    }

    /// The post id when this target is a post, for wire payloads.
    pub fn post_id(&self) -> Option<i64> {
        match self.kind {
            TargetKind::Post => Some(self.id),
            TargetKind::Comment => None,
        }
    }

    /// The comment id when this target is a comment, for wire payloads.
    pub fn comment_id(&self) -> Option<i64> {
        match self.kind {
            TargetKind::Post => None,
            TargetKind::Comment => Some(self.id),
        }
    }
}

/// Raised when a request names zero or both of post and comment.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Must specify exactly one of postId or commentId")]
pub struct AddressingError;

/// Request-shaped addressing as it arrives from a client: at most one of
/// the two ids should be present.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetRef {
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
}

impl TargetRef {
    pub fn post(id: i64) -> TargetRef {
        TargetRef {
            post_id: Some(id),
            comment_id: None,
        }
    }

    pub fn comment(id: i64) -> TargetRef {
        TargetRef {
            post_id: None,
            comment_id: Some(id),
        }
    }

    /// Enforces the exactly-one-of addressing rule and collapses the pair
    /// of optional ids into a [`VoteTarget`].
    pub fn resolve(&self) -> Result<VoteTarget, AddressingError> {
        match (self.post_id, self.comment_id) {
            (Some(post_id), None) => Ok(VoteTarget::post(post_id)),
            (None, Some(comment_id)) => Ok(VoteTarget::comment(comment_id)),
            _ => Err(AddressingError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_kind_codes_round_trip() {
        assert_eq!(TargetKind::from_code(TargetKind::Post.code()), Some(TargetKind::Post));
        assert_eq!(
            TargetKind::from_code(TargetKind::Comment.code()),
            Some(TargetKind::Comment)
        );
        assert_eq!(TargetKind::from_code(7), None);
    }

    #[test]
    fn test_target_ref_resolves_post() {
        let target = TargetRef::post(10).resolve().unwrap();
        assert_eq!(target, VoteTarget::post(10));
        assert_eq!(target.post_id(), Some(10));
        assert_eq!(target.comment_id(), None);
    }

    #[test]
    fn test_target_ref_resolves_comment() {
        let target = TargetRef::comment(20).resolve().unwrap();
        assert_eq!(target, VoteTarget::comment(20));
        assert_eq!(target.post_id(), None);
        assert_eq!(target.comment_id(), Some(20));
    }

    #[test]
    fn test_target_ref_rejects_neither() {
        assert_eq!(TargetRef::default().resolve(), Err(AddressingError));
    }

    #[test]
    fn test_target_ref_rejects_both() {
        let both = TargetRef {
            post_id: Some(10),
            comment_id: Some(20),
        };
        assert_eq!(both.resolve(), Err(AddressingError));
    }
}
