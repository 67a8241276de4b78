use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{VoteTarget, VoteValue};

/// Classifies why a notification was produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Upvote,
    Downvote,
    Comment,
    Reply,
}

impl NotificationKind {
    /// Wire/storage string for the `notifications.kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Upvote => "upvote",
            NotificationKind::Downvote => "downvote",
            NotificationKind::Comment => "comment",
            NotificationKind::Reply => "reply",
        }
    }

    pub fn from_str_code(code: &str) -> Option<NotificationKind> {
        match code {
            "upvote" => Some(NotificationKind::Upvote),
            "downvote" => Some(NotificationKind::Downvote),
            "comment" => Some(NotificationKind::Comment),
            "reply" => Some(NotificationKind::Reply),
            _ => None,
        }
    }

    /// The notification kind produced by a given vote value.
    pub fn for_vote(value: VoteValue) -> NotificationKind {
        match value {
            VoteValue::Up => NotificationKind::Upvote,
            VoteValue::Down => NotificationKind::Downvote,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Insert shape for a notification, produced by the vote and comment flows
/// as a side effect, never by the acting user directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewNotification {
    pub recipient_id: i64,
    pub sender_id: i64,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub kind: NotificationKind,
}

impl NewNotification {
    /// Builds the notification for a vote landing on `target`.
    pub fn for_vote(recipient_id: i64, sender_id: i64, target: VoteTarget, value: VoteValue) -> Self {
        NewNotification {
            recipient_id,
            sender_id,
            post_id: target.post_id(),
            comment_id: target.comment_id(),
            kind: NotificationKind::for_vote(value),
        }
    }
}

/// Represents a persisted notification row.
///
/// Owned by the recipient once created: only the recipient may flip the
/// read flag, and this core never deletes notifications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: i64,
    pub recipient_id: i64,
    pub sender_id: i64,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
