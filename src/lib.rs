//! SmartGear Catalog - product catalog server
//!
//! Serves products through a JSON API and server-rendered pages, caches the
//! full product list with absolute and sliding expiry, and pushes change
//! events to connected WebSocket clients.

pub mod api;
pub mod auth;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod tasks;
pub mod web;

pub use api::{create_router, AppState};
pub use catalog::{CatalogService, InMemoryRepository};
pub use config::Config;
pub use error::{CatalogError, Result};
pub use tasks::{spawn_cleanup_task, spawn_dispatcher};
