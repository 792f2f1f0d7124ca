// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::StoreError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Map the store's domain taxonomy onto HTTP statuses.
///
/// Anything the client cannot act on (redb, serialization, a missing wallet
/// mid-settlement) surfaces as a generic 500; the failed write transaction
/// has already been rolled back by that point.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Validation(_)
            | StoreError::EmailTaken
            | StoreError::UsernameTaken
            | StoreError::InvalidCredentials
            | StoreError::InvalidTransition(_)
            | StoreError::InsufficientFunds => Self::bad_request(err.to_string()),
            StoreError::Forbidden(_) => Self::forbidden(err.to_string()),
            StoreError::NotFound(_) | StoreError::ItemUnavailable => {
                Self::not_found(err.to_string())
            }
            StoreError::Redb(_)
            | StoreError::RedbDatabase(_)
            | StoreError::RedbTransaction(_)
            | StoreError::RedbTable(_)
            | StoreError::RedbStorage(_)
            | StoreError::RedbCommit(_)
            | StoreError::Serde(_)
            | StoreError::MissingWallet(_) => {
                tracing::error!(error = %err, "store failure");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<crate::auth::AuthError> for ApiError {
    fn from(err: crate::auth::AuthError) -> Self {
        Self::new(err.status_code(), err.to_string())
    }
}
