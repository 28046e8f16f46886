//! # Vault Event Bus
//!
//! One bus per session. Publishing never blocks the session: events go into
//! a bounded broadcast ring and a subscriber that falls behind loses the
//! oldest ones (it is told so with `EventsMissed`).

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::events::{EventFilter, VaultEvent};
use crate::subscriber::{EventStream, Subscription};

/// In-process bus carrying one session's events.
#[derive(Debug)]
pub struct InMemoryEventBus {
    sender: broadcast::Sender<VaultEvent>,
    published: AtomicU64,
}

impl InMemoryEventBus {
    /// Bus buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            published: AtomicU64::new(0),
        }
    }

    /// Receive every later event that passes `filter`.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "[bus] Subscribed");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Same as [`subscribe`](Self::subscribe), as a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.subscribe(filter))
    }

    /// Publish an event. Returns how many subscribers were handed it;
    /// an event nobody listens to is simply dropped.
    pub fn publish(&self, event: VaultEvent) -> usize {
        let sequence = self.published.fetch_add(1, Ordering::Relaxed);
        let topic = event.topic();
        match self.sender.send(event) {
            Ok(receivers) => {
                trace!(sequence, ?topic, receivers, "[bus] Published");
                receivers
            }
            Err(_) => {
                trace!(sequence, ?topic, "[bus] No subscribers");
                0
            }
        }
    }

    /// Events published since the bus was created.
    #[must_use]
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::with_capacity(crate::DEFAULT_CHANNEL_CAPACITY)
    }
}
