//! # Vote Engine Realtime
//! In-process broadcast transport for vote, comment, and notification events.
//!
//! Provides:
//! - Channel addressing (per-post, per-comment, per-user scopes)
//! - A typed outbound event envelope
//! - A broadcast hub built on `tokio::sync::broadcast`
//! - An explicit transport handle with an `Disabled` state, so callers
//!   carry "realtime is off" as a value instead of null-checking a global
mod channel;
mod errors;
mod event;
mod hub;

pub use channel::Channel;
pub use errors::BroadcastError;
pub use event::OutboundEvent;
pub use hub::{BroadcastHub, RealtimeTransport};
