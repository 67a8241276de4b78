use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::{BroadcastError, Channel, OutboundEvent};

const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Routes events to per-channel `tokio::sync::broadcast` senders.
///
/// Channels are created lazily on first subscription. Emitting into a
/// channel nobody subscribed to is a successful no-op; slow receivers drop
/// the oldest events per broadcast-channel semantics rather than blocking
/// the emitter.
pub struct BroadcastHub {
    capacity: usize,
    channels: RwLock<HashMap<String, broadcast::Sender<OutboundEvent>>>,
}

impl BroadcastHub {
    /// Creates a hub whose channels buffer `capacity` events per receiver.
    pub fn new(capacity: usize) -> Self {
        BroadcastHub {
            capacity,
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribes to a channel, creating it if needed.
    pub fn subscribe(&self, channel: &Channel) -> Result<broadcast::Receiver<OutboundEvent>, BroadcastError> {
        let key = channel.key();
        let mut channels = self.channels.write().map_err(|_| BroadcastError::LockPoisoned)?;
        let sender = channels
            .entry(key)
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        Ok(sender.subscribe())
    }

    /// Emits an event into a channel and returns the number of subscribers
    /// that received it.
    pub fn emit(&self, channel: &Channel, name: &str, payload: Value) -> Result<usize, BroadcastError> {
        let key = channel.key();
        let event = OutboundEvent {
            channel: key.clone(),
            name: name.to_string(),
            payload,
        };

        let sender = {
            let channels = self.channels.read().map_err(|_| BroadcastError::LockPoisoned)?;
            channels.get(&key).cloned()
        };

        let Some(sender) = sender else {
            trace!(channel = %key, event = name, "No channel registered, dropping event");
            return Ok(0);
        };

        match sender.send(event) {
            Ok(receivers) => {
                debug!(channel = %key, event = name, receivers, "Event broadcast");
                Ok(receivers)
            }
            // All receivers are gone; the channel stays registered for the
            // next subscriber.
            Err(_) => {
                trace!(channel = %key, event = name, "No live subscribers, dropping event");
                Ok(0)
            }
        }
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        BroadcastHub::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

/// Handle to the realtime transport as seen by the notifier.
///
/// `Disabled` is a first-class state: every emit is silently skipped and
/// the business outcome of the surrounding operation is unaffected.
#[derive(Clone)]
pub enum RealtimeTransport {
    Hub(Arc<BroadcastHub>),
    Disabled,
}

impl RealtimeTransport {
    pub fn hub(hub: Arc<BroadcastHub>) -> Self {
        RealtimeTransport::Hub(hub)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, RealtimeTransport::Hub(_))
    }

    /// Emits an event, returning how many subscribers received it.
    /// Returns `Ok(0)` when the transport is disabled.
    pub fn emit(&self, channel: &Channel, name: &str, payload: Value) -> Result<usize, BroadcastError> {
        match self {
            RealtimeTransport::Hub(hub) => hub.emit(channel, name, payload),
            RealtimeTransport::Disabled => {
                trace!(channel = %channel, event = name, "Realtime transport disabled, skipping broadcast");
                Ok(0)
            }
        }
    }
}
