//! Web Module
//!
//! Server-rendered product pages and form submissions.

pub mod handlers;
pub mod views;

pub use handlers::*;
