//! WebSocket Channel
//!
//! Streams `ProductChanged` events to connected browsers. Anyone may connect;
//! the channel only carries ids and actions.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{ProductChanged, SubscriberHub};

/// Handler for GET /productHub
pub async fn ws_handler(ws: WebSocketUpgrade, State(hub): State<SubscriberHub>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

/// Runs for the lifetime of one connection.
async fn handle_socket(socket: WebSocket, hub: SubscriberHub) {
    let mut rx = hub.subscribe();
    info!(subscribers = hub.subscriber_count(), "Real-time subscriber connected");

    let (mut sender, mut receiver) = socket.split();

    // Inbound frames are ignored; this task only notices the disconnect
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    debug!(error = %e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    loop {
        tokio::select! {
            event = next_event(&mut rx) => match event {
                Some(event) => {
                    if let Err(e) = send_event(&mut sender, event).await {
                        debug!(error = %e, "Subscriber unreachable, closing");
                        break;
                    }
                }
                None => break,
            },
            _ = &mut recv_task => break,
        }
    }

    recv_task.abort();
    info!("Real-time subscriber disconnected");
}

/// Next event for this subscriber, `None` once the hub is gone.
///
/// At-most-once: events a lagging subscriber missed are skipped.
async fn next_event(rx: &mut broadcast::Receiver<ProductChanged>) -> Option<ProductChanged> {
    loop {
        match rx.recv().await {
            Ok(event) => return Some(event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Subscriber lagged, events dropped");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: ProductChanged,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(&event).map_err(axum::Error::new)?;
    sender.send(Message::Text(json)).await
}
