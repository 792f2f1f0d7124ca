// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chef menu management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{Auth, ChefOnly},
    error::ApiError,
    models::{CreateMenuItemRequest, MenuItem, MessageResponse, UpdateMenuItemRequest},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/chefs/menu/",
    request_body = CreateMenuItemRequest,
    tag = "Chefs",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, body = MenuItem),
        (status = 400, description = "Negative price"),
        (status = 403, description = "Not a chef")
    )
)]
pub async fn create_menu_item(
    ChefOnly(chef): ChefOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItem>), ApiError> {
    let item = state.db.create_menu_item(
        chef.id,
        &request.name,
        &request.description,
        request.price,
        request.available,
    )?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/chefs/menu/{item_id}",
    params(("item_id" = u64, Path, description = "Menu item to update")),
    request_body = UpdateMenuItemRequest,
    tag = "Chefs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Missing or not owned")
    )
)]
pub async fn update_menu_item(
    Auth(current): Auth,
    Path(item_id): Path<u64>,
    State(state): State<AppState>,
    Json(request): Json<UpdateMenuItemRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.db.update_menu_item(
        item_id,
        current.id,
        &request.name,
        &request.description,
        request.price,
        request.available,
    )?;
    Ok(Json(MessageResponse {
        message: "Menu item updated successfully".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/chefs/menu/{item_id}",
    params(("item_id" = u64, Path, description = "Menu item to delete")),
    tag = "Chefs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, description = "Referenced by active orders"),
        (status = 404, description = "Missing or not owned")
    )
)]
pub async fn delete_menu_item(
    Auth(current): Auth,
    Path(item_id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.db.delete_menu_item(item_id, current.id)?;
    Ok(Json(MessageResponse {
        message: "Menu item deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{seeded_chef, test_state};
    use crate::auth::CurrentUser;
    use rust_decimal_macros::dec;

    fn create_request(price: rust_decimal::Decimal) -> CreateMenuItemRequest {
        CreateMenuItemRequest {
            name: "Pho".to_string(),
            description: "Beef noodle soup".to_string(),
            price,
            available: true,
        }
    }

    #[tokio::test]
    async fn create_menu_item_returns_201() {
        let (state, _dir) = test_state();
        let chef = seeded_chef(&state);

        let (status, Json(item)) = create_menu_item(
            ChefOnly(chef.clone()),
            State(state.clone()),
            Json(create_request(dec!(12.50))),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(item.chef_id, chef.id);
        assert_eq!(item.price, dec!(12.50));
        assert_eq!(state.db.get_menu_item(item.id).unwrap().unwrap(), item);
    }

    #[tokio::test]
    async fn create_menu_item_rejects_negative_price() {
        let (state, _dir) = test_state();
        let chef = seeded_chef(&state);

        let err = create_menu_item(
            ChefOnly(chef),
            State(state),
            Json(create_request(dec!(-1.00))),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_items_as_404() {
        let (state, _dir) = test_state();
        let chef = seeded_chef(&state);

        let err = update_menu_item(
            Auth(CurrentUser::from(
                state.db.get_user(chef.id).unwrap().unwrap(),
            )),
            Path(999),
            State(state.clone()),
            Json(UpdateMenuItemRequest {
                name: "X".to_string(),
                description: String::new(),
                price: dec!(1.00),
                available: true,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Menu item not found or not owned by you");

        let err = delete_menu_item(
            Auth(chef),
            Path(999),
            State(state),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_then_delete_round() {
        let (state, _dir) = test_state();
        let chef = seeded_chef(&state);
        let (_, Json(item)) = create_menu_item(
            ChefOnly(chef.clone()),
            State(state.clone()),
            Json(create_request(dec!(10.00))),
        )
        .await
        .unwrap();

        let Json(body) = update_menu_item(
            Auth(chef.clone()),
            Path(item.id),
            State(state.clone()),
            Json(UpdateMenuItemRequest {
                name: "Bun Cha".to_string(),
                description: "Grilled pork".to_string(),
                price: dec!(14.00),
                available: false,
            }),
        )
        .await
        .unwrap();
        assert_eq!(body.message, "Menu item updated successfully");

        let Json(body) = delete_menu_item(Auth(chef), Path(item.id), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(body.message, "Menu item deleted successfully");
        assert!(state.db.get_menu_item(item.id).unwrap().is_none());
    }
}
