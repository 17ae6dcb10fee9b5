//! API Module
//!
//! Shared application state, the JSON handlers and router assembly.
//!
//! # Endpoints
//! - `GET|POST /api/products` - List or create products
//! - `GET|PUT|DELETE /api/products/:id` - Read, replace or delete one product
//! - `GET /api/categories` - List categories
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::ApiJson;
pub use handlers::*;
pub use routes::create_router;
