//! API Routes
//!
//! Assembles the JSON API, the product pages and the real-time channel into
//! one Axum router.

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_product_handler, delete_product_handler, get_product_handler, health_handler,
    list_categories_handler, list_products_handler, stats_handler, update_product_handler,
    AppState,
};
use crate::auth::{identity_middleware, mutation_gate};
use crate::notify::ws_handler;
use crate::web;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET|POST /api/products`, `GET|PUT|DELETE /api/products/:id`
/// - `GET /api/categories`
/// - `GET /products`, `/products/listpartial`, `/products/recent`,
///   `/products/details/:id` - public pages
/// - `GET|POST /products/create`, `/products/edit/:id`, `/products/delete/:id` -
///   behind the mutation gate
/// - `GET /productHub` - WebSocket change notifications
/// - `GET /stats`, `GET /health`
///
/// # Middleware
/// - Identity: turns upstream auth headers into a `Principal`
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/api/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route(
            "/api/products/:id",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
        .route("/api/categories", get(list_categories_handler));

    let public_pages = Router::new()
        .route("/products", get(web::index_handler))
        .route("/products/listpartial", get(web::list_partial_handler))
        .route("/products/recent", get(web::recent_handler))
        .route("/products/details/:id", get(web::details_handler));

    // route_layer: the gate only runs for requests that matched one of these
    let gated_pages = Router::new()
        .route(
            "/products/create",
            get(web::create_form_handler).post(web::create_handler),
        )
        .route(
            "/products/edit/:id",
            get(web::edit_form_handler).post(web::edit_handler),
        )
        .route(
            "/products/delete/:id",
            get(web::delete_form_handler).post(web::delete_handler),
        )
        .route_layer(middleware::from_fn(mutation_gate));

    Router::new()
        .merge(api)
        .merge(public_pages)
        .merge(gated_pages)
        .route("/productHub", get(ws_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(identity_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryRepository;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let (state, _rx) =
            AppState::from_config(&Config::default(), Arc::new(InMemoryRepository::seeded()));
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_page_needs_no_identity() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/products/details/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_gated_page_anonymous() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/products/create?user=admin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_api_product_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/products/404")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
