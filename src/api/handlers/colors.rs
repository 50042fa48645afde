//! Color request handlers.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    middleware,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::COLOR_TAG;
use crate::api::dto::{ColorListParams, ColorResponse, ErrorResponse, PageResponse, PostColorRequest};
use crate::api::middleware::{AuthUser, auth_middleware};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates color routes.
///
/// Reads are public; creating and deleting require a bearer token.
///
/// # Routes
/// - `GET /` - List colors, paged and filtered
/// - `POST /` - Create a color authored by the caller
/// - `GET /{id}` - Get color by id
/// - `DELETE /{id}` - Delete color by id
/// - `GET /name/{name}` - Get color by exact name
/// - `GET /hex/{hex}` - Get color by hex code
pub fn color_routes(state: AppState) -> OpenApiRouter<AppState> {
    let protected = OpenApiRouter::new()
        .routes(routes!(post_color))
        .routes(routes!(delete_color))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    OpenApiRouter::new()
        .routes(routes!(list_colors))
        .routes(routes!(get_color))
        .routes(routes!(get_color_by_name))
        .routes(routes!(get_color_by_hex))
        .merge(protected)
}

/// GET /api/colors - List colors
#[utoipa::path(
    get,
    path = "/",
    tag = COLOR_TAG,
    params(ColorListParams),
    responses(
        (status = 200, description = "One page of colors", body = PageResponse<ColorResponse>),
        (status = 400, description = "Invalid paging or sort parameters", body = ErrorResponse)
    )
)]
async fn list_colors(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ColorListParams>,
) -> AppResult<Json<PageResponse<ColorResponse>>> {
    let page = state
        .services
        .colors
        .get_colors(
            params.page,
            params.size,
            &params.sort,
            &params.filter,
            &params.author,
        )
        .await?;
    Ok(Json(page.into()))
}

/// GET /api/colors/{id} - Get color by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = COLOR_TAG,
    params(
        ("id" = i32, Path, description = "Color ID")
    ),
    responses(
        (status = 200, description = "Color found", body = ColorResponse),
        (status = 404, description = "Color not found", body = ErrorResponse)
    )
)]
async fn get_color(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ColorResponse>> {
    let color = state.services.colors.get_color_by_id(id).await?;
    Ok(Json(color.into()))
}

/// GET /api/colors/name/{name} - Get color by name
///
/// The match is exact and case-sensitive.
#[utoipa::path(
    get,
    path = "/name/{name}",
    tag = COLOR_TAG,
    params(
        ("name" = String, Path, description = "Color name")
    ),
    responses(
        (status = 200, description = "Color found", body = ColorResponse),
        (status = 404, description = "Color not found", body = ErrorResponse)
    )
)]
async fn get_color_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ColorResponse>> {
    let color = state.services.colors.get_color_by_name(&name).await?;
    Ok(Json(color.into()))
}

/// GET /api/colors/hex/{hex} - Get color by hex code
#[utoipa::path(
    get,
    path = "/hex/{hex}",
    tag = COLOR_TAG,
    params(
        ("hex" = String, Path, description = "Hex code")
    ),
    responses(
        (status = 200, description = "Color found", body = ColorResponse),
        (status = 404, description = "Color not found", body = ErrorResponse)
    )
)]
async fn get_color_by_hex(
    State(state): State<AppState>,
    Path(hex): Path<String>,
) -> AppResult<Json<ColorResponse>> {
    let color = state.services.colors.get_color_by_hex(&hex).await?;
    Ok(Json(color.into()))
}

/// POST /api/colors - Create a color
///
/// The authenticated caller is recorded as the author.
#[utoipa::path(
    post,
    path = "/",
    tag = COLOR_TAG,
    request_body = PostColorRequest,
    responses(
        (status = 201, description = "Color created", body = ColorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Hex already exists", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn post_color(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<PostColorRequest>,
) -> AppResult<(StatusCode, Json<ColorResponse>)> {
    let new_color = payload.into_new_color(Some(user.user_id));
    let color = state.services.colors.post_color(new_color).await?;
    Ok((StatusCode::CREATED, Json(color.into())))
}

/// DELETE /api/colors/{id} - Delete a color
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = COLOR_TAG,
    params(
        ("id" = i32, Path, description = "Color ID")
    ),
    responses(
        (status = 204, description = "Color deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Color not found", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn delete_color(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    state.services.colors.delete_color(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
