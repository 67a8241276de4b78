//! Realtime fan-out for committed vote and comment activity.
//!
//! The notifier runs strictly after the orchestrator's transaction commits
//! and never participates in it: a failure here propagates to the caller
//! but cannot undo the recorded vote. Broadcast delivery is best-effort;
//! notification persistence is durable and happens whether or not the
//! transport is available.
use std::sync::Arc;

use serde_json::json;
use tracing::debug;
use vote_engine_realtime::{Channel, RealtimeTransport};
use vote_engine_repository::NotificationsRepository;
use vote_engine_shared::types::{NewNotification, NotificationKind, TargetKind, VoteTarget, VoteValue};

use crate::errors::NotifierError;

/// Event delivered to a target channel when a vote lands or changes.
pub const VOTE_UPDATE: &str = "vote:update";
/// Event delivered to a target channel when a vote is withdrawn.
pub const VOTE_REMOVE: &str = "vote:remove";
/// Event delivered to a post channel when a top-level comment is posted.
pub const COMMENT_NEW: &str = "comment:new";
/// Event delivered to a comment channel when a reply is posted.
pub const COMMENT_REPLY: &str = "comment:reply";
/// Event delivered to a user channel when a notification is created for them.
pub const NOTIFICATION_NEW: &str = "notification:new";

fn target_channel(target: &VoteTarget) -> Channel {
    match target.kind {
        TargetKind::Post => Channel::Post(target.id),
        TargetKind::Comment => Channel::Comment(target.id),
    }
}

/// The parent comment a reply attaches to.
#[derive(Debug, Clone, Copy)]
pub struct CommentParent {
    pub comment_id: i64,
    pub owner_id: i64,
}

/// Emits targeted events to content subscribers and persists notifications
/// for content owners.
///
/// The transport is an injected capability with an explicit disabled
/// state, not an ambient global handle.
pub struct RealtimeNotifier {
    transport: RealtimeTransport,
    notifications: Arc<dyn NotificationsRepository>,
}

impl RealtimeNotifier {
    pub fn new(transport: RealtimeTransport, notifications: Arc<dyn NotificationsRepository>) -> Self {
        Self {
            transport,
            notifications,
        }
    }

    /// Announces a committed vote: `vote:update` to the target's channel,
    /// plus a persisted notification and `notification:new` to the owner
    /// when the voter is somebody else.
    pub async fn vote_applied(
        &self,
        voter_id: i64,
        target: VoteTarget,
        value: VoteValue,
        owner_id: i64,
    ) -> Result<(), NotifierError> {
        self.transport.emit(
            &target_channel(&target),
            VOTE_UPDATE,
            json!({
                "postId": target.post_id(),
                "commentId": target.comment_id(),
                "value": value.value(),
                "voterId": voter_id,
            }),
        )?;

        if owner_id != voter_id {
            let notification = self
                .notifications
                .create(&NewNotification::for_vote(owner_id, voter_id, target, value))
                .await?;
            debug!(
                notification_id = notification.id,
                recipient_id = owner_id,
                kind = %notification.kind,
                "Notification created"
            );
            self.transport.emit(
                &Channel::User(owner_id),
                NOTIFICATION_NEW,
                serde_json::to_value(&notification)?,
            )?;
        }

        Ok(())
    }

    /// Announces a withdrawn vote. Removals do not notify the owner.
    pub async fn vote_removed(
        &self,
        voter_id: i64,
        target: VoteTarget,
    ) -> Result<(), NotifierError> {
        self.transport.emit(
            &target_channel(&target),
            VOTE_REMOVE,
            json!({
                "postId": target.post_id(),
                "commentId": target.comment_id(),
                "voterId": voter_id,
            }),
        )?;

        Ok(())
    }

    /// Announces a committed comment or reply and notifies the owner of
    /// the content it landed on.
    pub async fn comment_posted(
        &self,
        commenter_id: i64,
        post_id: i64,
        comment_id: i64,
        post_owner_id: i64,
        parent: Option<CommentParent>,
    ) -> Result<(), NotifierError> {
        let (event, channel) = match parent {
            Some(parent) => (COMMENT_REPLY, Channel::Comment(parent.comment_id)),
            None => (COMMENT_NEW, Channel::Post(post_id)),
        };

        self.transport.emit(
            &channel,
            event,
            json!({
                "postId": post_id,
                "commentId": comment_id,
                "parentId": parent.map(|p| p.comment_id),
                "commenterId": commenter_id,
            }),
        )?;

        let (recipient_id, kind, notified_comment_id) = match parent {
            Some(parent) => (parent.owner_id, NotificationKind::Reply, parent.comment_id),
            None => (post_owner_id, NotificationKind::Comment, comment_id),
        };

        if recipient_id != commenter_id {
            let notification = self
                .notifications
                .create(&NewNotification {
                    recipient_id,
                    sender_id: commenter_id,
                    post_id: Some(post_id),
                    comment_id: Some(notified_comment_id),
                    kind,
                })
                .await?;
            self.transport.emit(
                &Channel::User(recipient_id),
                NOTIFICATION_NEW,
                serde_json::to_value(&notification)?,
            )?;
        }

        Ok(())
    }
}
