//! Error types for the catalog server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::catalog::{ProductId, RepositoryError};

// == Field Errors ==
/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears on the wire (camelCase)
    pub field: &'static str,
    /// Human readable message
    pub message: String,
}

/// Every constraint violation found while validating one input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns true if any error concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Messages recorded for `field`, in insertion order.
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Converts into a `Result`, failing when at least one error was recorded.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|e| e.field).collect();
        write!(f, "{}", fields.join(", "))
    }
}

// == Catalog Error Enum ==
/// Unified error type for the catalog server.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Field constraints violated; never reaches the repository
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Repository failure other than "not found"
    #[error("Repository operation {operation} failed")]
    Persistence {
        operation: &'static str,
        id: Option<ProductId>,
        #[source]
        source: RepositoryError,
    },

    /// No authenticated principal
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated, but not allowed
    #[error("Forbidden")]
    Forbidden,

    /// Malformed request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Wraps a repository failure with the operation and entity it concerned.
    pub fn persistence(
        operation: &'static str,
        id: Option<ProductId>,
        source: RepositoryError,
    ) -> Self {
        CatalogError::Persistence {
            operation,
            id,
            source,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            CatalogError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation failed", "fields": errors }),
            ),
            CatalogError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            CatalogError::Persistence {
                operation,
                id,
                source,
            } => {
                error!(operation = *operation, id = ?id, error = %source, "Repository operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            CatalogError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" }))
            }
            CatalogError::Forbidden => (StatusCode::FORBIDDEN, json!({ "error": "Forbidden" })),
            CatalogError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            CatalogError::Internal(msg) => {
                error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog server.
pub type Result<T> = std::result::Result<T, CatalogError>;
