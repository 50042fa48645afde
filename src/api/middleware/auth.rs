//! JWT authentication middleware.
//!
//! Provides middleware for validating JWT tokens and extracting user claims.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Extension type for authenticated user information
///
/// This is added to request extensions after successful authentication
/// and can be extracted in handlers using `Extension<AuthUser>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub username: String,
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
            username: claims.username,
        })
    }
}

/// JWT authentication middleware
///
/// Validates the JWT token from the Authorization header and adds
/// the authenticated user information to request extensions.
///
/// # Headers
/// Expects: `Authorization: Bearer <token>`
///
/// # Errors
/// Returns 401 Unauthorized if the header is missing or malformed, or the
/// token is invalid, expired or not an access token.
///
/// # Example
/// ```ignore
/// OpenApiRouter::new()
///     .routes(routes!(post_color))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized("Invalid authorization header format. Expected: Bearer <token>")
    })?;

    let claims = validate_access_token(token, &state.jwt_config.secret)?;
    let auth_user = AuthUser::try_from(claims)?;
    tracing::debug!(user_id = auth_user.user_id, "Authenticated request");
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
