//! # Subscriptions
//!
//! Receiving side of the bus. A subscriber that falls behind the ring
//! buffer gets a single `EventsMissed` in place of what it lost, provided its
//! filter accepts failures.

use std::pin::Pin;
use std::task::{ready, Context, Poll};

use thiserror::Error;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::warn;

use crate::events::{EventFilter, VaultEvent};

/// Subscription errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    /// The bus was dropped.
    #[error("event bus closed")]
    Closed,
}

/// Apply the filter to one delivery; a lag becomes `EventsMissed`.
fn admit(filter: &EventFilter, delivery: Result<VaultEvent, u64>) -> Option<VaultEvent> {
    let event = match delivery {
        Ok(event) => event,
        Err(skipped) => {
            warn!(skipped, "[bus] Subscriber lagged, events lost");
            VaultEvent::EventsMissed { skipped }
        }
    };
    filter.matches(&event).then_some(event)
}

/// Handle for receiving filtered events.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<VaultEvent>,
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<VaultEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Wait for the next matching event. `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<VaultEvent> {
        loop {
            let delivery = match self.receiver.recv().await {
                Ok(event) => Ok(event),
                Err(RecvError::Lagged(skipped)) => Err(skipped),
                Err(RecvError::Closed) => return None,
            };
            if let Some(event) = admit(&self.filter, delivery) {
                return Some(event);
            }
        }
    }

    /// Take the next matching event if one is already buffered.
    pub fn try_recv(&mut self) -> Result<Option<VaultEvent>, SubscriptionError> {
        loop {
            let delivery = match self.receiver.try_recv() {
                Ok(event) => Ok(event),
                Err(TryRecvError::Lagged(skipped)) => Err(skipped),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Closed) => return Err(SubscriptionError::Closed),
            };
            if let Some(event) = admit(&self.filter, delivery) {
                return Ok(Some(event));
            }
        }
    }

    /// The filter this subscription applies.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

/// A subscription as a `tokio_stream::Stream`.
pub struct EventStream {
    inner: BroadcastStream<VaultEvent>,
    filter: EventFilter,
}

impl EventStream {
    /// Turn a subscription into a stream.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        Self {
            inner: BroadcastStream::new(subscription.receiver),
            filter: subscription.filter,
        }
    }
}

impl Stream for EventStream {
    type Item = VaultEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            let delivery = match ready!(Pin::new(&mut self.inner).poll_next(cx)) {
                Some(Ok(event)) => Ok(event),
                Some(Err(BroadcastStreamRecvError::Lagged(skipped))) => Err(skipped),
                None => return Poll::Ready(None),
            };
            if let Some(event) = admit(&self.filter, delivery) {
                return Poll::Ready(Some(event));
            }
        }
    }
}
