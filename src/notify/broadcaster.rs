//! Change Broadcaster
//!
//! Mutations publish into a bounded queue without waiting. A dispatcher task
//! drains the queue into the subscriber hub, which fans each event out to
//! every connected subscriber. Nothing is persisted or replayed.

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use super::ProductChanged;

/// Default size of the publish queue.
pub const DEFAULT_NOTIFY_BUFFER: usize = 256;

/// Default per-subscriber buffer; slower subscribers lag and lose events.
pub const DEFAULT_HUB_CAPACITY: usize = 1024;

// == Change Notifier ==
/// Publishing side, cloned into every request that mutates the catalog.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: mpsc::Sender<ProductChanged>,
}

impl ChangeNotifier {
    /// Creates a notifier and the receiving end for the dispatcher.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<ProductChanged>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { tx }, rx)
    }

    /// Queues an event. Never blocks; a full or closed queue drops the event.
    ///
    /// Returns true if the event was queued.
    pub fn publish(&self, event: ProductChanged) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!(action = event.action.as_str(), id = event.id, "Notification queue full, dropping event");
                false
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                debug!(action = event.action.as_str(), id = event.id, "Notification dispatcher stopped, dropping event");
                false
            }
        }
    }
}

// == Subscriber Hub ==
/// Fan-out point for connected real-time subscribers.
#[derive(Debug, Clone)]
pub struct SubscriberHub {
    sender: broadcast::Sender<ProductChanged>,
}

impl SubscriberHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Delivers to everyone subscribed right now. Returns the receiver count.
    pub fn send(&self, event: ProductChanged) -> usize {
        // Err only means nobody is listening
        self.sender.send(event).unwrap_or_default()
    }

    /// Receives events sent after this call; earlier events are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<ProductChanged> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SubscriberHub {
    fn default() -> Self {
        Self::new(DEFAULT_HUB_CAPACITY)
    }
}
