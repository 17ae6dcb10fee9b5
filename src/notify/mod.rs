//! Change Notification Module
//!
//! Fire-and-forget fan-out of `ProductChanged` events to real-time subscribers.

mod broadcaster;
mod events;
pub mod ws;

pub use broadcaster::{ChangeNotifier, SubscriberHub, DEFAULT_HUB_CAPACITY, DEFAULT_NOTIFY_BUFFER};
pub use events::{ChangeAction, ProductChanged};
pub use ws::ws_handler;
