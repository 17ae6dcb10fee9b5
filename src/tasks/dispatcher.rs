//! Notification Dispatcher Task
//!
//! Moves published change events from the bounded queue to the subscriber hub.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::notify::{ProductChanged, SubscriberHub};

/// Spawns the dispatcher. It exits once every `ChangeNotifier` is dropped.
pub fn spawn_dispatcher(
    mut rx: mpsc::Receiver<ProductChanged>,
    hub: SubscriberHub,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Notification dispatcher started");

        while let Some(event) = rx.recv().await {
            let delivered = hub.send(event);
            debug!(
                action = event.action.as_str(),
                id = event.id,
                delivered,
                "Dispatched ProductChanged"
            );
        }

        info!("Notification dispatcher stopped");
    })
}
