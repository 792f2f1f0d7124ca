// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chef wallet endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::ChefOnly,
    error::ApiError,
    models::{BalanceResponse, MessageResponse},
    state::AppState,
};

#[derive(Deserialize, IntoParams)]
pub struct WithdrawParams {
    pub amount: Decimal,
}

#[utoipa::path(
    post,
    path = "/wallets/withdraw/",
    params(WithdrawParams),
    tag = "Wallets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, description = "Non-positive amount or insufficient funds"),
        (status = 403, description = "Not a chef")
    )
)]
pub async fn withdraw(
    ChefOnly(chef): ChefOnly,
    Query(params): Query<WithdrawParams>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.db.withdraw(chef.id, params.amount)?;
    Ok(Json(MessageResponse {
        message: "Withdrawal successful".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/wallets/balance/",
    tag = "Wallets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = BalanceResponse),
        (status = 403, description = "Not a chef")
    )
)]
pub async fn balance(
    ChefOnly(chef): ChefOnly,
    State(state): State<AppState>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.db.balance(chef.id)?;
    Ok(Json(BalanceResponse { balance }))
}
