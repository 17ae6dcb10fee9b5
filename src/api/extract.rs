//! JSON Body Extractor
//!
//! `axum::Json` answers malformed or mistyped bodies with its own 4xx codes
//! and plain-text bodies. `ApiJson` turns every such rejection into a 400
//! `CatalogError` so the API reports request problems in one shape.

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CatalogError;

/// JSON request body; any rejection becomes `400 {"error": ...}`.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(reject(rejection)),
        }
    }
}

fn reject(rejection: JsonRejection) -> CatalogError {
    debug!(status = %rejection.status(), "Rejected JSON body");
    CatalogError::InvalidRequest(rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductPayload;
    use axum::body::Body;

    fn json_request(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_mistyped_field_names_the_field() {
        let result =
            ApiJson::<ProductPayload>::from_request(json_request(r#"{"basePrice":"abc"}"#), &())
                .await;
        match result {
            Err(CatalogError::InvalidRequest(message)) => assert!(message.contains("basePrice")),
            other => panic!("expected invalid request, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_syntax_error_and_missing_content_type() {
        let result = ApiJson::<ProductPayload>::from_request(json_request("{"), &()).await;
        assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));

        let request = axum::http::Request::builder()
            .method("POST")
            .body(Body::from("{}"))
            .unwrap();
        let result = ApiJson::<ProductPayload>::from_request(request, &()).await;
        assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));
    }
}
