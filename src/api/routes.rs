//! Router configuration for the API.
//!
//! This module provides centralized route registration, OpenAPI
//! collection and middleware configuration for the application.

use axum::{Router, http::StatusCode, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Compression - encodes the final body, after errors are rendered
/// 2. Request ID middleware - generates/propagates request IDs
/// 3. Logging middleware - logs requests inside a span carrying the request ID
/// 4. Global error handler - renders every error as `ErrorResponse`
/// 5. CORS
///
/// # Routes
/// - `/api/colors` - Color lookups, listing, creation and deletion
/// - `/api/auth` - Registration, login and token refresh
/// - `/api/health` - Health probes
/// - `/swagger-ui`, `/api-docs/openapi.json` - API documentation
pub fn create_router(state: AppState) -> Router {
    let (api_router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/colors", handlers::colors::color_routes(state.clone()))
        .nest("/api/auth", handlers::auth::auth_routes())
        .nest("/api", handlers::health::health_routes())
        .split_for_parts();

    api_router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .with_state(state)
}
