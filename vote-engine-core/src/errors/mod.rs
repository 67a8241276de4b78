//! Error types for the vote engine core.
//! Consolidates and re-exports error types for the orchestrator and the
//! notifier.
mod notifier;
mod vote;

pub use notifier::NotifierError;
pub use vote::VoteError;
