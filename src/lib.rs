// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Plateful - Food Delivery Marketplace Backend
//!
//! Users register as chefs or foodies, chefs publish menu items, foodies
//! place orders. Placing an order atomically credits 90% of the item price
//! to the chef's wallet; the remaining 10% is the platform fee. Wallets are
//! drawn down via withdrawal, guarded against overdrafts.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Password hashing, JWT issuance/verification, role gates
//! - `store` - Embedded ACID storage (redb) with atomic order settlement

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
