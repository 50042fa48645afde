//! Error handler for converting AppError to HTTP responses.
//!
//! This module implements the IntoResponse trait for AppError,
//! providing consistent error response formatting across the API.
//! Includes status code mapping, error message sanitization,
//! and request ID injection for correlation.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::{AppError, ColorError};

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// The rendered [`ErrorResponse`] is also stored in the response
    /// extensions so [`global_error_handler`] can stamp the request ID on it.
    fn into_response(self) -> Response {
        match &self {
            AppError::Database { source, .. }
            | AppError::Configuration { source, .. }
            | AppError::ConnectionPool { source }
            | AppError::Internal { source } => {
                tracing::error!(error = %self, cause = %source, "Request failed");
            }
            _ => tracing::debug!(error = %self, "Request rejected"),
        }

        let status = error_to_status_code(&self);
        let body = error_to_body(&self);
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
///
/// - Color NotFound / NotFound → 404
/// - Color AlreadyExists / Duplicate → 409
/// - Validation / ValidationErrors / BadRequest → 400
/// - Unauthorized → 401
/// - ConnectionPool → 503
/// - Database / Configuration / Internal → 500
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::Color(ColorError::NotFound { .. }) | AppError::NotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        AppError::Color(ColorError::AlreadyExists { .. }) | AppError::Duplicate { .. } => {
            StatusCode::CONFLICT
        }
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::Color(ColorError::NotFound { .. }) => "COLOR_NOT_FOUND",
        AppError::Color(ColorError::AlreadyExists { .. }) => "COLOR_ALREADY_EXISTS",
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Unauthorized { .. } => "UNAUTHORIZED",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Builds the response body. Infrastructure failures are sanitized: their
/// sources are logged, never returned.
fn error_to_body(error: &AppError) -> ErrorResponse {
    let code = error_to_code(error);
    match error {
        AppError::Color(ColorError::NotFound { key }) => {
            ErrorResponse::new(code, &error.to_string())
                .with_details(json!({ "field": key.field(), "value": key.value() }))
        }
        AppError::Color(ColorError::AlreadyExists { hex }) => {
            ErrorResponse::new(code, &error.to_string()).with_details(json!({ "hex": hex }))
        }
        AppError::NotFound {
            entity,
            field,
            value,
        } => ErrorResponse::not_found_error(entity, field, value),
        AppError::Duplicate {
            entity,
            field,
            value,
        } => ErrorResponse::duplicate_error(entity, field, value),
        AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
        AppError::ValidationErrors { errors } => {
            ErrorResponse::new(code, "Request validation failed").with_details(json!(errors))
        }
        AppError::BadRequest { message } | AppError::Unauthorized { message } => {
            ErrorResponse::new(code, message)
        }
        AppError::Database { operation, .. } => ErrorResponse::new(
            code,
            &format!("Database operation failed: {}", operation),
        )
        .with_details(json!({ "operation": operation })),
        AppError::Configuration { key, .. } => {
            ErrorResponse::new(code, &format!("Configuration error: {}", key))
                .with_details(json!({ "key": key }))
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new(code, "Database connection unavailable")
        }
        AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
    }
}

/// Global error handling middleware.
///
/// Responses produced from an [`AppError`] get the request ID added to
/// their body. Any other error status without a JSON body (axum's own
/// rejections, unknown routes) is rewritten into an [`ErrorResponse`].
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().cloned();
    let mut response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    if let Some(body) = response.extensions_mut().remove::<ErrorResponse>() {
        return render(status, body, request_id);
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap_or_default();
    let original = String::from_utf8_lossy(&body).trim().to_string();
    let message = if original.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        original
    };

    render(status, ErrorResponse::new(status_code_name(status), &message), request_id)
}

fn render(status: StatusCode, body: ErrorResponse, request_id: Option<RequestId>) -> Response {
    let body = match request_id {
        Some(RequestId(id)) => body.with_request_id(&id),
        None => body,
    };
    (status, Json(body)).into_response()
}

fn status_code_name(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        StatusCode::REQUEST_TIMEOUT => "REQUEST_TIMEOUT",
        StatusCode::SERVICE_UNAVAILABLE => "SERVICE_UNAVAILABLE",
        s if s.is_server_error() => "INTERNAL_SERVER_ERROR",
        _ => "UNKNOWN_ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ColorKey, ValidationFieldError};
    use axum::{Router, body::Body, middleware, routing::get};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_color_errors_status_codes() {
        let not_found = AppError::from(ColorError::not_found(ColorKey::Id(1)));
        assert_eq!(error_to_status_code(&not_found), StatusCode::NOT_FOUND);
        assert_eq!(error_to_code(&not_found), "COLOR_NOT_FOUND");

        let exists = AppError::from(ColorError::already_exists("ff0000"));
        assert_eq!(error_to_status_code(&exists), StatusCode::CONFLICT);
        assert_eq!(error_to_code(&exists), "COLOR_ALREADY_EXISTS");
    }

    #[test]
    fn test_generic_status_codes() {
        let cases = [
            (
                AppError::Duplicate {
                    entity: "users".to_string(),
                    field: "email".to_string(),
                    value: "a@b.c".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                AppError::BadRequest {
                    message: "nope".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Validation {
                    field: "size".to_string(),
                    reason: "too small".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (AppError::unauthorized("nope"), StatusCode::UNAUTHORIZED),
            (
                AppError::ConnectionPool {
                    source: anyhow::anyhow!("timed out"),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Internal {
                    source: anyhow::anyhow!("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error_to_status_code(&error), status, "{:?}", error);
        }
    }

    #[tokio::test]
    async fn test_color_not_found_body() {
        let response = AppError::from(ColorError::not_found(ColorKey::Hex("abc".to_string())))
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["code"], "COLOR_NOT_FOUND");
        assert_eq!(json["message"], "Color not found with hex='abc'");
        assert_eq!(json["details"]["field"], "hex");
        assert_eq!(json["details"]["value"], "abc");
    }

    #[tokio::test]
    async fn test_validation_errors_body() {
        let response = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "hex".to_string(),
                message: "Hex must be between 1 and 32 characters".to_string(),
            }],
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["details"][0]["field"], "hex");
    }

    #[tokio::test]
    async fn test_internal_error_is_sanitized() {
        let response = AppError::Database {
            operation: "select colors".to_string(),
            source: anyhow::anyhow!("password=hunter2 in connection string"),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let text = body_json(response).await.to_string();
        assert!(!text.contains("hunter2"));
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/missing",
                get(|| async { AppError::from(ColorError::not_found(ColorKey::Id(9))) }),
            )
            .route(
                "/plain",
                get(|| async { (StatusCode::BAD_REQUEST, "Custom validation failed") }),
            )
            .fallback(|| async { StatusCode::NOT_FOUND })
            .layer(middleware::from_fn(global_error_handler))
            .layer(axum::Extension(RequestId("req-42".to_string())))
    }

    #[tokio::test]
    async fn test_global_error_handler_adds_request_id() {
        let response = app()
            .oneshot(axum::http::Request::get("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["code"], "COLOR_NOT_FOUND");
        assert_eq!(json["request_id"], "req-42");
    }

    #[tokio::test]
    async fn test_global_error_handler_wraps_plain_text() {
        let response = app()
            .oneshot(axum::http::Request::get("/plain").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["message"], "Custom validation failed");
    }

    #[tokio::test]
    async fn test_global_error_handler_unknown_route() {
        let response = app()
            .oneshot(axum::http::Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Not Found");
    }
}
