//! User service: registration, credential checks and token issuance.

use std::sync::Arc;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::UserStore;
use crate::utils::jwt::{TokenPair, generate_token_pair, validate_refresh_token};
use crate::utils::password::{hash_password, verify_password};

/// User service for handling user-related business logic.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Registers a user, hashing the plain-text password in `new_user`.
    ///
    /// # Returns
    /// The created user; a taken username or email is `AppError::Duplicate`
    pub async fn register(&self, mut new_user: NewUser) -> AppResult<User> {
        new_user.password = hash_password(&new_user.password)?;
        let user = self.store.create(new_user).await?;
        tracing::info!(user_id = user.id, username = %user.username, "Registered user");
        Ok(user)
    }

    /// Checks credentials and issues a token pair.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        jwt: &JwtConfig,
    ) -> AppResult<(User, TokenPair)> {
        let invalid = || AppError::unauthorized("Invalid email or password");

        let user = self.store.find_by_email(email).await?.ok_or_else(invalid)?;
        if !verify_password(password, &user.password)? {
            tracing::warn!(user_id = user.id, "Rejected login with wrong password");
            return Err(invalid());
        }

        let tokens = generate_token_pair(user.id, &user.email, &user.username, jwt)?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok((user, tokens))
    }

    /// Exchanges a refresh token for a new pair.
    ///
    /// The user must still exist; tokens for deleted users are rejected.
    pub async fn refresh(&self, refresh_token: &str, jwt: &JwtConfig) -> AppResult<TokenPair> {
        let claims = validate_refresh_token(refresh_token, &jwt.secret)?;
        let user = self
            .store
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        generate_token_pair(user.id, &user.email, &user.username, jwt)
    }

    /// Gets a user by their ID.
    ///
    /// # Returns
    /// The user if found, or `NotFound` error
    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "user".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.store.find_by_username(username).await
    }
}
