// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication: bcrypt password hashing, HS256 access tokens, and the
//! axum extractors that gate handlers on account and role.

mod error;
mod extractor;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use extractor::{Auth, ChefOnly, CurrentUser, FoodieOnly};
