//! Authentication handlers for login and token management.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    ErrorResponse, LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse,
    RegisterRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::jwt::generate_token_pair;
use crate::utils::validate::ValidatedJson;

/// Creates the authentication routes
///
/// # Routes
/// - `POST /login` - Authenticate user and get tokens
/// - `POST /register` - Register new user and get tokens
/// - `POST /refresh` - Refresh access token using refresh token
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(login))
        .routes(routes!(register))
        .routes(routes!(refresh_token))
}

/// POST /api/auth/login - Authenticate user
///
/// Authenticates a user with email and password, returns JWT tokens.
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (user, tokens) = state
        .services
        .users
        .authenticate(&payload.email, &payload.password, &state.jwt_config)
        .await?;

    Ok(Json(LoginResponse::new(user, tokens)))
}

/// POST /api/auth/register - Register new user
///
/// Creates a new user account and returns JWT tokens.
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = LoginResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 409, description = "User already exists", body = ErrorResponse)
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    let user = state
        .services
        .users
        .register(payload.into_new_user())
        .await?;
    let tokens = generate_token_pair(user.id, &user.email, &user.username, &state.jwt_config)?;

    Ok((StatusCode::CREATED, Json(LoginResponse::new(user, tokens))))
}

/// POST /api/auth/refresh - Refresh access token
///
/// Validates the refresh token and issues new access and refresh tokens.
#[utoipa::path(
    post,
    path = "/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed successfully", body = RefreshTokenResponse),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse)
    )
)]
async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<RefreshTokenResponse>> {
    let tokens = state
        .services
        .users
        .refresh(&payload.refresh_token, &state.jwt_config)
        .await?;

    Ok(Json(tokens.into()))
}
