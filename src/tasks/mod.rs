//! Background Tasks Module
//!
//! Long-running tasks spawned at startup.
//!
//! # Tasks
//! - Cache sweep: evicts the product list once it has expired
//! - Notification dispatcher: drains the publish queue into the subscriber hub

mod cleanup;
mod dispatcher;

pub use cleanup::spawn_cleanup_task;
pub use dispatcher::spawn_dispatcher;
