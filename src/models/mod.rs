//! Request and Response models
//!
//! DTOs for the JSON API and the server-rendered forms.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{PageQuery, ProductForm, ProductPayload};
pub use responses::{HealthResponse, ProductResponse, StatsResponse};
