use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An event ready to fan out to the subscribers of one channel.
///
/// The payload is already wire-shaped JSON; the hub only routes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboundEvent {
    /// Key of the channel the event was emitted into, e.g. `post_10`.
    pub channel: String,
    /// Event name as delivered to clients, e.g. `vote:update`.
    pub name: String,
    pub payload: Value,
}
