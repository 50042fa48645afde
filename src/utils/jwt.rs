use jiff::Timestamp;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

const SECONDS_PER_HOUR: i64 = 3600;

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token sent with every authenticated request
    Access,
    /// Long-lived token exchanged for a new pair
    Refresh,
}

/// JWT Claims structure containing user information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub username: String,
    pub token_type: TokenType,
    /// Issued at, seconds since the Unix epoch
    pub iat: i64,
    /// Expiration, seconds since the Unix epoch
    pub exp: i64,
}

impl Claims {
    /// Creates claims valid for `ttl_hours` from now.
    pub fn new(
        user_id: i32,
        email: impl Into<String>,
        username: impl Into<String>,
        token_type: TokenType,
        ttl_hours: i64,
    ) -> Self {
        let iat = Timestamp::now().as_second();

        Self {
            sub: user_id.to_string(),
            email: email.into(),
            username: username.into(),
            token_type,
            iat,
            exp: iat + ttl_hours * SECONDS_PER_HOUR,
        }
    }

    /// The authenticated user's id.
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid token subject"))
    }
}

/// An access/refresh token pair issued on login or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs `claims` with the configured secret.
pub fn encode_claims(claims: &Claims, secret: &str) -> AppResult<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Issues an access and a refresh token for the given user.
///
/// Expirations come from `config` and are expressed in hours.
pub fn generate_token_pair(
    user_id: i32,
    email: &str,
    username: &str,
    config: &JwtConfig,
) -> AppResult<TokenPair> {
    let access = Claims::new(
        user_id,
        email,
        username,
        TokenType::Access,
        config.access_token_expiration,
    );
    let refresh = Claims::new(
        user_id,
        email,
        username,
        TokenType::Refresh,
        config.refresh_token_expiration,
    );

    Ok(TokenPair {
        access_token: encode_claims(&access, &config.secret)?,
        refresh_token: encode_claims(&refresh, &config.secret)?,
    })
}

/// Validates and decodes a JWT token
///
/// # Arguments
/// * `token` - The JWT token string to validate
/// * `secret` - The secret key for verifying the token
/// * `expected_type` - Optional expected token type to validate against
///
/// # Returns
/// The decoded claims if the token is valid
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized("Token has expired"),
        ErrorKind::InvalidToken => AppError::unauthorized("Invalid token"),
        ErrorKind::InvalidSignature => AppError::unauthorized("Invalid token signature"),
        _ => AppError::unauthorized(format!("Token validation failed: {}", e)),
    })?;

    if let Some(expected) = expected_type
        && claims.token_type != expected
    {
        return Err(AppError::unauthorized(format!(
            "Invalid token type: expected {:?}, got {:?}",
            expected, claims.token_type
        )));
    }

    Ok(claims)
}

pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}
