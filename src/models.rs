// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Domain and API Data Models
//!
//! Domain entities (`User`, `MenuItem`, `Order`, `Wallet`) are stored as
//! JSON values in redb and are the single source of truth for both the
//! store and the API layers. Request and response bodies are explicit typed
//! structs validated at the HTTP boundary.
//!
//! Money is always `rust_decimal::Decimal`; floats never touch a balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Roles
// =============================================================================

/// Account role, fixed at registration.
///
/// - `Chef` - sells menu items and owns a wallet
/// - `Foodie` - places orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sells menu items; owns exactly one wallet.
    Chef,
    /// Places orders.
    Foodie,
}

impl Role {
    /// Parse a role from the free-text form used at registration.
    ///
    /// Anything other than `chef` or `foodie` is rejected at the boundary.
    pub fn parse(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "chef" => Some(Role::Chef),
            "foodie" => Some(Role::Foodie),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Chef => write!(f, "chef"),
            Role::Foodie => write!(f, "foodie"),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Canonical order state, shared by the API and store layers.
///
/// Transitions: `pending -> {in_progress, completed, cancelled}` via edit,
/// `pending|in_progress -> cancelled` via cancel. `completed` and
/// `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::InProgress => write!(f, "in_progress"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// =============================================================================
// Entities
// =============================================================================

/// A registered account. Root entity: menu items, orders and wallets all
/// reference it by id.
///
/// Never serialized into an API response (the password hash lives here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    /// Unique, derived from the email local-part at registration.
    pub username: String,
    /// Unique.
    pub email: String,
    /// bcrypt hash; the plaintext is never stored.
    pub password_hash: String,
    pub role: Role,
}

/// A menu item owned by exactly one chef.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub id: u64,
    /// User id of the owning chef.
    pub chef_id: u64,
    pub name: String,
    pub description: String,
    /// Non-negative.
    pub price: Decimal,
    pub available: bool,
}

/// A purchase of exactly one menu item by one foodie from one chef.
///
/// `total_price` is a snapshot of the item price at order time and is never
/// recomputed from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: u64,
    /// User id of the foodie who placed the order.
    pub customer_id: u64,
    /// User id of the chef whose item was ordered.
    pub chef_id: u64,
    pub menu_item_id: u64,
    pub total_price: Decimal,
    pub delivery_address: String,
    pub status: OrderStatus,
}

/// Per-chef balance ledger. 1:1 with a chef user; balance never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub chef_id: u64,
    pub balance: Decimal,
}

// =============================================================================
// Request / Response Models
// =============================================================================

/// Request body for POST /auth/register.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// `"chef"` or `"foodie"`.
    pub role: String,
}

/// Generic `{message}` response used by most mutating endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for POST /auth/login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub username: String,
    pub email: String,
    /// Wallet balance, present for chef accounts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<Decimal>,
}

/// Request body for POST /chefs/menu/.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Defaults to true.
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Request body for PUT /chefs/menu/{id}. Overwrites all four fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateMenuItemRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub available: bool,
}

/// Request body for POST /orders/order/.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub menu_item_id: u64,
    pub delivery_address: String,
}

/// Response for PUT /orders/orders/{id}/cancel.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CancelOrderResponse {
    pub message: String,
    pub order_id: u64,
}

/// Response for GET /wallets/balance/.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BalanceResponse {
    pub balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_case_insensitive_and_closed() {
        assert_eq!(Role::parse("chef"), Some(Role::Chef));
        assert_eq!(Role::parse("Foodie"), Some(Role::Foodie));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn order_status_terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::InProgress.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn order_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            r#""in_progress""#
        );
        let parsed: OrderStatus = serde_json::from_str(r#""cancelled""#).unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn login_response_omits_missing_wallet() {
        let response = LoginResponse {
            access_token: "t".into(),
            token_type: "bearer".into(),
            username: "bob".into(),
            email: "bob@x.com".into(),
            wallet: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("wallet"));
    }

    #[test]
    fn create_menu_item_request_defaults_to_available() {
        let request: CreateMenuItemRequest =
            serde_json::from_str(r#"{"name":"Pho","description":"Soup","price":"12.50"}"#)
                .unwrap();
        assert!(request.available);
    }
}
