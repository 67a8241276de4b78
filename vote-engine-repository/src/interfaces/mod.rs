//! This module defines and re-exports the interfaces for the vote engine's
//! durable state. It serves as a central point for accessing traits related
//! to data interaction.
mod notifications;
mod votes;

pub use notifications::NotificationsRepository;
pub use votes::{VoteStore, VoteUnit};
