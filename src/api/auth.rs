// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account lifecycle: registration, login, profile update, deletion.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::{password, token, Auth},
    error::ApiError,
    models::{LoginResponse, MessageResponse, RegisterRequest, Role},
    state::AppState,
};

#[derive(Deserialize, IntoParams)]
pub struct LoginParams {
    /// Email or username.
    pub identifier: String,
    pub password: String,
}

#[derive(Deserialize, IntoParams)]
pub struct UpdateUserParams {
    pub new_username: String,
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    tag = "Authentication",
    responses(
        (status = 201, body = MessageResponse),
        (status = 400, description = "Invalid role, invalid email, or email taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let role = Role::parse(&request.role)
        .ok_or_else(|| ApiError::bad_request("Invalid role. Choose 'chef' or 'foodie'"))?;

    let password_hash = password::hash_password(&request.password)?;
    let user = state
        .db
        .register_user(&request.email, &password_hash, role)?;

    let message = match user.role {
        Role::Chef => "Chef account created successfully",
        Role::Foodie => "Foodie account created successfully",
    };
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    params(LoginParams),
    tag = "Authentication",
    responses(
        (status = 200, body = LoginResponse),
        (status = 400, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<LoginParams>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .db
        .find_by_identifier(&params.identifier)?
        .filter(|u| password::verify_password(&params.password, &u.password_hash))
        .ok_or_else(|| ApiError::bad_request("Invalid credentials"))?;

    let access_token = token::issue(
        &state.config.secret_key,
        user.id,
        state.config.token_expire_minutes,
    )?;

    // Chefs see their balance at login; foodies have no wallet
    let wallet = match user.role {
        Role::Chef => Some(state.db.balance(user.id).unwrap_or_default()),
        Role::Foodie => None,
    };

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        username: user.username,
        email: user.email,
        wallet,
    }))
}

#[utoipa::path(
    put,
    path = "/auth/user/{user_id}",
    params(
        ("user_id" = u64, Path, description = "Account to update"),
        UpdateUserParams
    ),
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, description = "Username already taken"),
        (status = 403, description = "Not your account")
    )
)]
pub async fn update_user(
    Auth(current): Auth,
    Path(user_id): Path<u64>,
    Query(params): Query<UpdateUserParams>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    if current.id != user_id {
        return Err(ApiError::forbidden("You can only edit your own profile"));
    }

    state.db.update_username(user_id, &params.new_username)?;
    Ok(Json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/auth/user/{user_id}",
    params(("user_id" = u64, Path, description = "Account to delete")),
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 403, description = "Not your account")
    )
)]
pub async fn delete_user(
    Auth(current): Auth,
    Path(user_id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    if current.id != user_id {
        return Err(ApiError::forbidden("You can only delete your own account"));
    }

    state.db.delete_user(user_id)?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::test_state;
    use crate::auth::CurrentUser;
    use axum::http::StatusCode;

    fn register_request(email: &str, role: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "hunter2".to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn register_creates_chef_with_wallet() {
        let (state, _dir) = test_state();

        let (status, Json(body)) = register(
            State(state.clone()),
            Json(register_request("chef@x.com", "chef")),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.message, "Chef account created successfully");

        let user = state.db.find_by_identifier("chef@x.com").unwrap().unwrap();
        assert_eq!(user.role, Role::Chef);
        assert_eq!(state.db.balance(user.id).unwrap(), rust_decimal::Decimal::ZERO);
    }

    #[tokio::test]
    async fn register_rejects_unknown_role() {
        let (state, _dir) = test_state();

        let err = register(State(state), Json(register_request("a@x.com", "admin")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid role. Choose 'chef' or 'foodie'");
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let (state, _dir) = test_state();
        register(
            State(state.clone()),
            Json(register_request("a@x.com", "foodie")),
        )
        .await
        .unwrap();

        let err = register(State(state), Json(register_request("a@x.com", "chef")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Email already registered");
    }

    #[tokio::test]
    async fn login_by_email_and_username() {
        let (state, _dir) = test_state();
        register(
            State(state.clone()),
            Json(register_request("bob@x.com", "chef")),
        )
        .await
        .unwrap();

        let Json(by_email) = login(
            State(state.clone()),
            Query(LoginParams {
                identifier: "bob@x.com".to_string(),
                password: "hunter2".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(by_email.username, "bob");
        assert_eq!(by_email.token_type, "bearer");
        // Chef login includes the wallet balance
        assert_eq!(by_email.wallet, Some(rust_decimal::Decimal::ZERO));

        let Json(by_username) = login(
            State(state),
            Query(LoginParams {
                identifier: "bob".to_string(),
                password: "hunter2".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(by_username.email, "bob@x.com");
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_unknown_user() {
        let (state, _dir) = test_state();
        register(
            State(state.clone()),
            Json(register_request("bob@x.com", "foodie")),
        )
        .await
        .unwrap();

        let err = login(
            State(state.clone()),
            Query(LoginParams {
                identifier: "bob@x.com".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid credentials");

        let err = login(
            State(state),
            Query(LoginParams {
                identifier: "nobody@x.com".to_string(),
                password: "hunter2".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.message, "Invalid credentials");
    }

    #[tokio::test]
    async fn foodie_login_has_no_wallet_field() {
        let (state, _dir) = test_state();
        register(
            State(state.clone()),
            Json(register_request("eve@x.com", "foodie")),
        )
        .await
        .unwrap();

        let Json(response) = login(
            State(state),
            Query(LoginParams {
                identifier: "eve@x.com".to_string(),
                password: "hunter2".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.wallet, None);
    }

    #[tokio::test]
    async fn update_user_is_self_only() {
        let (state, _dir) = test_state();
        let user = state
            .db
            .register_user("bob@x.com", "hash", Role::Foodie)
            .unwrap();
        let current = CurrentUser::from(user.clone());

        let err = update_user(
            Auth(current.clone()),
            Path(user.id + 1),
            Query(UpdateUserParams {
                new_username: "robert".to_string(),
            }),
            State(state.clone()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.message, "You can only edit your own profile");

        let Json(body) = update_user(
            Auth(current),
            Path(user.id),
            Query(UpdateUserParams {
                new_username: "robert".to_string(),
            }),
            State(state.clone()),
        )
        .await
        .unwrap();
        assert_eq!(body.message, "Profile updated successfully");
        assert_eq!(
            state.db.get_user(user.id).unwrap().unwrap().username,
            "robert"
        );
    }

    #[tokio::test]
    async fn delete_user_is_self_only() {
        let (state, _dir) = test_state();
        let user = state
            .db
            .register_user("bob@x.com", "hash", Role::Foodie)
            .unwrap();
        let current = CurrentUser::from(user.clone());

        let err = delete_user(Auth(current.clone()), Path(user.id + 1), State(state.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let Json(body) = delete_user(Auth(current), Path(user.id), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(body.message, "User deleted successfully");
        assert!(state.db.get_user(user.id).unwrap().is_none());
    }
}
