//! Error types for the realtime transport.
use thiserror::Error;

/// Represents errors that can occur while emitting into the broadcast hub.
///
/// Delivery is best-effort: a channel without subscribers is not an error.
#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("Broadcast hub lock poisoned")]
    LockPoisoned,
}
