//! # Vote Engine Core
//! This crate implements the voting and karma-consistency engine: the
//! orchestrator that sequences ledger mutation, aggregate recompute, and
//! karma adjustment inside one transaction, and the notifier that fans out
//! realtime events after the transaction commits.
pub mod errors;
pub mod notifier;
pub mod orchestrator;

pub use errors::{NotifierError, VoteError};
pub use notifier::{CommentParent, RealtimeNotifier};
pub use orchestrator::VoteOrchestrator;

#[cfg(test)]
mod testing;
