mod notification;
mod target;
mod vote;

pub use notification::{NewNotification, Notification, NotificationKind};
pub use target::{AddressingError, TargetKind, TargetRef, VoteTarget};
pub use vote::{UpsertOutcome, VoteReceipt, VoteRecord, VoteValue};
