// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Order placement and lifecycle.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::{Auth, FoodieOnly},
    error::ApiError,
    models::{CancelOrderResponse, MessageResponse, Order, OrderStatus, PlaceOrderRequest},
    state::AppState,
};

#[derive(Deserialize, IntoParams)]
pub struct EditOrderParams {
    pub new_status: OrderStatus,
}

#[utoipa::path(
    post,
    path = "/orders/order/",
    request_body = PlaceOrderRequest,
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, body = Order),
        (status = 403, description = "Not a foodie"),
        (status = 404, description = "Item not available")
    )
)]
pub async fn place_order(
    FoodieOnly(foodie): FoodieOnly,
    State(state): State<AppState>,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state
        .db
        .place_order(foodie.id, request.menu_item_id, &request.delivery_address)?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    put,
    path = "/orders/order/{order_id}",
    params(
        ("order_id" = u64, Path, description = "Order to update"),
        EditOrderParams
    ),
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, description = "Order is not pending, or pending was the target"),
        (status = 404, description = "Missing or not owned")
    )
)]
pub async fn edit_order(
    Auth(current): Auth,
    Path(order_id): Path<u64>,
    Query(params): Query<EditOrderParams>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.db.edit_order(order_id, current.id, params.new_status)?;
    Ok(Json(MessageResponse {
        message: "Order status updated successfully".to_string(),
    }))
}

#[utoipa::path(
    put,
    path = "/orders/orders/{order_id}/cancel",
    params(("order_id" = u64, Path, description = "Order to cancel")),
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = CancelOrderResponse),
        (status = 400, description = "Order already terminal"),
        (status = 403, description = "Not your order"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn cancel_order(
    Auth(current): Auth,
    Path(order_id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<CancelOrderResponse>, ApiError> {
    let order = state.db.cancel_order(order_id, current.id)?;
    Ok(Json(CancelOrderResponse {
        message: "Order cancelled successfully".to_string(),
        order_id: order.id,
    }))
}
