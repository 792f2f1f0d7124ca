// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        BalanceResponse, CancelOrderResponse, CreateMenuItemRequest, LoginResponse, MenuItem,
        MessageResponse, Order, OrderStatus, PlaceOrderRequest, RegisterRequest, Role,
        UpdateMenuItemRequest,
    },
    state::AppState,
};

pub mod auth;
pub mod chefs;
pub mod orders;
pub mod wallets;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(welcome))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route(
            "/auth/user/{user_id}",
            put(auth::update_user).delete(auth::delete_user),
        )
        .route("/chefs/menu/", post(chefs::create_menu_item))
        .route(
            "/chefs/menu/{item_id}",
            put(chefs::update_menu_item).delete(chefs::delete_menu_item),
        )
        .route("/orders/order/", post(orders::place_order))
        .route("/orders/order/{order_id}", put(orders::edit_order))
        .route("/orders/orders/{order_id}/cancel", put(orders::cancel_order))
        .route("/wallets/withdraw/", post(wallets::withdraw))
        .route("/wallets/balance/", get(wallets::balance))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Authentication",
    responses((status = 200, body = MessageResponse))
)]
async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Food Delivery API".to_string(),
    })
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        welcome,
        auth::register,
        auth::login,
        auth::update_user,
        auth::delete_user,
        chefs::create_menu_item,
        chefs::update_menu_item,
        chefs::delete_menu_item,
        orders::place_order,
        orders::edit_order,
        orders::cancel_order,
        wallets::withdraw,
        wallets::balance
    ),
    components(
        schemas(
            Role,
            OrderStatus,
            MenuItem,
            Order,
            RegisterRequest,
            MessageResponse,
            LoginResponse,
            CreateMenuItemRequest,
            UpdateMenuItemRequest,
            PlaceOrderRequest,
            CancelOrderResponse,
            BalanceResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Authentication", description = "Account registration, login and profile management"),
        (name = "Chefs", description = "Menu management for chef accounts"),
        (name = "Orders", description = "Order placement and lifecycle"),
        (name = "Wallets", description = "Chef wallet balance and withdrawals")
    )
)]
struct ApiDoc;
