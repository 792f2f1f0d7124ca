// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity store: registration, lookup, profile update, account deletion.

use redb::{ReadableDatabase, ReadableTable};
use rust_decimal::Decimal;

use crate::models::{Role, User, Wallet};

use super::{
    next_id, MarketDb, StoreError, StoreResult, EMAIL_INDEX, MENU_ITEMS, USERNAME_INDEX, USERS,
    WALLETS,
};

impl MarketDb {
    /// Create a user with a freshly derived username.
    ///
    /// Chef registration creates the zero-balance wallet in the same write
    /// transaction as the user row and both index rows, so a failure at any
    /// point leaves no orphan records.
    pub fn register_user(&self, email: &str, password_hash: &str, role: Role) -> StoreResult<User> {
        if !email.contains('@') {
            return Err(StoreError::Validation("Invalid email address".to_string()));
        }

        let write_txn = self.db.begin_write()?;
        let user = {
            let mut users = write_txn.open_table(USERS)?;
            let mut by_username = write_txn.open_table(USERNAME_INDEX)?;
            let mut by_email = write_txn.open_table(EMAIL_INDEX)?;
            let mut counters = write_txn.open_table(super::COUNTERS)?;

            if by_email.get(email)?.is_some() {
                return Err(StoreError::EmailTaken);
            }

            let username = derive_username(&by_username, email)?;
            let id = next_id(&mut counters, "users")?;

            let user = User {
                id,
                username: username.clone(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                role,
            };
            users.insert(id, serde_json::to_vec(&user)?.as_slice())?;
            by_username.insert(username.as_str(), id)?;
            by_email.insert(email, id)?;

            if role == Role::Chef {
                let mut wallets = write_txn.open_table(WALLETS)?;
                let wallet = Wallet {
                    chef_id: id,
                    balance: Decimal::ZERO,
                };
                wallets.insert(id, serde_json::to_vec(&wallet)?.as_slice())?;
            }

            user
        };
        write_txn.commit()?;

        tracing::info!(user_id = user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Look up a user by id.
    pub fn get_user(&self, id: u64) -> StoreResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let users = read_txn.open_table(USERS)?;
        match users.get(id)? {
            Some(v) => Ok(Some(serde_json::from_slice(v.value())?)),
            None => Ok(None),
        }
    }

    /// Look up a user by email or username, in that order.
    pub fn find_by_identifier(&self, identifier: &str) -> StoreResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let by_email = read_txn.open_table(EMAIL_INDEX)?;
        let by_username = read_txn.open_table(USERNAME_INDEX)?;

        let id = match by_email.get(identifier)? {
            Some(v) => Some(v.value()),
            None => by_username.get(identifier)?.map(|v| v.value()),
        };

        match id {
            Some(id) => {
                let users = read_txn.open_table(USERS)?;
                match users.get(id)? {
                    Some(v) => Ok(Some(serde_json::from_slice(v.value())?)),
                    None => Ok(None),
                }
            }
            None => Ok(None),
        }
    }

    /// Change a user's username, keeping the uniqueness index in step.
    pub fn update_username(&self, user_id: u64, new_username: &str) -> StoreResult<User> {
        if new_username.is_empty() {
            return Err(StoreError::Validation(
                "new_username must not be empty".to_string(),
            ));
        }

        let write_txn = self.db.begin_write()?;
        let user = {
            let mut users = write_txn.open_table(USERS)?;
            let mut by_username = write_txn.open_table(USERNAME_INDEX)?;

            let mut user: User = {
                let guard = users
                    .get(user_id)?
                    .ok_or_else(|| StoreError::NotFound("User not found".to_string()))?;
                serde_json::from_slice(guard.value())?
            };

            if new_username != user.username {
                if by_username.get(new_username)?.is_some() {
                    return Err(StoreError::UsernameTaken);
                }
                by_username.remove(user.username.as_str())?;
                by_username.insert(new_username, user_id)?;
                user.username = new_username.to_string();
                users.insert(user_id, serde_json::to_vec(&user)?.as_slice())?;
            }

            user
        };
        write_txn.commit()?;
        Ok(user)
    }

    /// Delete a user and everything it owns: index rows, wallet, menu items.
    ///
    /// Orders are historical records and are intentionally kept.
    pub fn delete_user(&self, user_id: u64) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut users = write_txn.open_table(USERS)?;
            let user: User = {
                let guard = users
                    .remove(user_id)?
                    .ok_or_else(|| StoreError::NotFound("User not found".to_string()))?;
                serde_json::from_slice(guard.value())?
            };

            let mut by_username = write_txn.open_table(USERNAME_INDEX)?;
            by_username.remove(user.username.as_str())?;
            let mut by_email = write_txn.open_table(EMAIL_INDEX)?;
            by_email.remove(user.email.as_str())?;

            let mut wallets = write_txn.open_table(WALLETS)?;
            wallets.remove(user_id)?;

            let mut menu_items = write_txn.open_table(MENU_ITEMS)?;
            let owned: Vec<u64> = {
                let mut ids = Vec::new();
                for entry in menu_items.range(0..=u64::MAX)? {
                    let (key, value) = entry?;
                    let item: crate::models::MenuItem = serde_json::from_slice(value.value())?;
                    if item.chef_id == user_id {
                        ids.push(key.value());
                    }
                }
                ids
            };
            for id in owned {
                menu_items.remove(id)?;
            }
        }
        write_txn.commit()?;

        tracing::info!(user_id, "user deleted");
        Ok(())
    }
}

/// Derive a unique username from the email local-part, appending an
/// incrementing numeric suffix on collision: `bob`, `bob1`, `bob2`, ...
///
/// Runs against the index inside the caller's write transaction, so the
/// chosen name cannot be taken before the insert commits.
fn derive_username<T>(index: &T, email: &str) -> StoreResult<String>
where
    T: ReadableTable<&'static str, u64>,
{
    let base = email.split('@').next().unwrap_or_default();
    let base = if base.is_empty() { "user" } else { base };

    let mut candidate = base.to_string();
    let mut counter = 1u32;
    while index.get(candidate.as_str())?.is_some() {
        candidate = format!("{base}{counter}");
        counter += 1;
    }
    Ok(candidate)
}
