//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `color` - Color request/response DTOs and list parameters
//! - `auth` - Registration, login and token refresh DTOs
//! - `error` - Common error response DTOs

mod auth;
mod color;
mod error;

pub use auth::{
    LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse, RegisterRequest,
    UserInfo,
};
pub use color::{ColorListParams, ColorResponse, PageResponse, PostColorRequest};
pub use error::ErrorResponse;
