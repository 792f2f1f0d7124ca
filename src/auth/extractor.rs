// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is CurrentUser
//! }
//! ```
//!
//! `ChefOnly` and `FoodieOnly` layer a role check on top.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{token, AuthError};
use crate::models::{Role, User};
use crate::state::AppState;

/// Authenticated account attached to a request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Extractor for authenticated users.
///
/// Validates the bearer token from the Authorization header and loads the
/// account it names. A token whose subject no longer exists (deleted account)
/// is rejected the same way as a bad token.
pub struct Auth(pub CurrentUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // First check if middleware already set the user
        if let Some(user) = parts.extensions.get::<CurrentUser>().cloned() {
            return Ok(Auth(user));
        }

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        // Extract Bearer token
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let claims = token::verify(&state.config.secret_key, token)?;

        let user = state
            .db
            .get_user(claims.sub)
            .map_err(|e| AuthError::InternalError(e.to_string()))?
            .ok_or(AuthError::UnknownUser)?;

        Ok(Auth(user.into()))
    }
}

/// Extractor that requires a chef account.
pub struct ChefOnly(pub CurrentUser);

impl FromRequestParts<AppState> for ChefOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        if user.role != Role::Chef {
            return Err(AuthError::InsufficientPermissions(
                "Access denied: You are not a chef".to_string(),
            ));
        }

        Ok(ChefOnly(user))
    }
}

/// Extractor that requires a foodie account.
pub struct FoodieOnly(pub CurrentUser);

impl FromRequestParts<AppState> for FoodieOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        if user.role != Role::Foodie {
            return Err(AuthError::InsufficientPermissions(
                "Only foodies can place orders".to_string(),
            ));
        }

        Ok(FoodieOnly(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::store::MarketDb;
    use axum::http::Request;
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        let db = MarketDb::open(&dir.path().join("test.redb")).unwrap();
        let config = AppConfig {
            secret_key: "test-secret".to_string(),
            token_expire_minutes: 60,
            data_dir: dir.path().to_path_buf(),
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        (AppState::new(db, config), dir)
    }

    fn parts_with_token(token: &str) -> Parts {
        Request::builder()
            .uri("/test")
            .header("Authorization", format!("Bearer {token}"))
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn auth_requires_header() {
        let (state, _dir) = test_state();
        let mut parts = Request::builder().uri("/test").body(()).unwrap().into_parts().0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_loads_the_token_subject() {
        let (state, _dir) = test_state();
        let user = state
            .db
            .register_user("chef@x.com", "hash", Role::Chef)
            .unwrap();
        let token = token::issue("test-secret", user.id, 60).unwrap();

        let mut parts = parts_with_token(&token);
        let Auth(current) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(current.id, user.id);
        assert_eq!(current.role, Role::Chef);
    }

    #[tokio::test]
    async fn deleted_account_invalidates_token() {
        let (state, _dir) = test_state();
        let user = state
            .db
            .register_user("chef@x.com", "hash", Role::Chef)
            .unwrap();
        let token = token::issue("test-secret", user.id, 60).unwrap();
        state.db.delete_user(user.id).unwrap();

        let mut parts = parts_with_token(&token);
        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::UnknownUser)));
    }

    #[tokio::test]
    async fn auth_prefers_extensions() {
        let (state, _dir) = test_state();
        let mut parts = Request::builder().uri("/test").body(()).unwrap().into_parts().0;

        let user = CurrentUser {
            id: 7,
            username: "middleware".to_string(),
            email: "m@x.com".to_string(),
            role: Role::Foodie,
        };
        parts.extensions.insert(user);

        let Auth(current) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(current.id, 7);
    }

    #[tokio::test]
    async fn chef_only_rejects_foodies() {
        let (state, _dir) = test_state();
        let user = state
            .db
            .register_user("foodie@x.com", "hash", Role::Foodie)
            .unwrap();
        let token = token::issue("test-secret", user.id, 60).unwrap();

        let mut parts = parts_with_token(&token);
        let result = ChefOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions(_))));
    }

    #[tokio::test]
    async fn foodie_only_rejects_chefs() {
        let (state, _dir) = test_state();
        let user = state
            .db
            .register_user("chef@x.com", "hash", Role::Chef)
            .unwrap();
        let token = token::issue("test-secret", user.id, 60).unwrap();

        let mut parts = parts_with_token(&token);
        let result = FoodieOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions(_))));
    }
}
