// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded marketplace database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `users`: user id → serialized User
//! - `username_index`: username → user id
//! - `email_index`: email → user id
//! - `menu_items`: item id → serialized MenuItem
//! - `orders`: order id → serialized Order
//! - `wallets`: chef user id → serialized Wallet
//! - `counters`: counter name → last issued id
//!
//! ## Unit of Work
//!
//! Every mutating operation is one `begin_write()` .. `commit()` pair.
//! redb serializes writers, so a multi-table operation (order insert plus
//! wallet credit, user insert plus index rows plus wallet) is all-or-nothing
//! and cannot interleave with another writer. Dropping an uncommitted write
//! transaction rolls it back, so any error exit leaves the store untouched.
//!
//! The username/email index tables double as uniqueness constraints: the
//! existence check and the insert happen inside the same write transaction,
//! which closes the check-then-insert race.

mod catalog;
mod orders;
mod users;
mod wallets;

pub use orders::settlement_credit;

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: user id → serialized User (JSON bytes).
const USERS: TableDefinition<u64, &[u8]> = TableDefinition::new("users");

/// Uniqueness index: username → user id.
const USERNAME_INDEX: TableDefinition<&str, u64> = TableDefinition::new("username_index");

/// Uniqueness index: email → user id.
const EMAIL_INDEX: TableDefinition<&str, u64> = TableDefinition::new("email_index");

/// Catalog: menu item id → serialized MenuItem.
const MENU_ITEMS: TableDefinition<u64, &[u8]> = TableDefinition::new("menu_items");

/// Orders: order id → serialized Order.
const ORDERS: TableDefinition<u64, &[u8]> = TableDefinition::new("orders");

/// Wallets: chef user id → serialized Wallet (1:1 with chef accounts).
const WALLETS: TableDefinition<u64, &[u8]> = TableDefinition::new("wallets");

/// Id counters: counter name → last issued id.
const COUNTERS: TableDefinition<&str, u64> = TableDefinition::new("counters");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Item not available")]
    ItemUnavailable,

    #[error("{0}")]
    InvalidTransition(String),

    #[error("Insufficient funds")]
    InsufficientFunds,

    /// A chef user exists without a wallet row. Registration creates both in
    /// one transaction, so this indicates corruption and surfaces as a 500.
    #[error("wallet missing for chef {0}")]
    MissingWallet(u64),
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// MarketDb
// =============================================================================

/// Embedded ACID marketplace database.
pub struct MarketDb {
    db: Database,
}

impl MarketDb {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS)?;
            let _ = write_txn.open_table(USERNAME_INDEX)?;
            let _ = write_txn.open_table(EMAIL_INDEX)?;
            let _ = write_txn.open_table(MENU_ITEMS)?;
            let _ = write_txn.open_table(ORDERS)?;
            let _ = write_txn.open_table(WALLETS)?;
            let _ = write_txn.open_table(COUNTERS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    #[cfg(test)]
    fn database(&self) -> &Database {
        &self.db
    }
}

/// Issue the next sequential id from the counters table.
///
/// Must be called inside the same write transaction as the insert that
/// consumes the id.
fn next_id(counters: &mut redb::Table<&str, u64>, key: &str) -> StoreResult<u64> {
    let next = counters.get(key)?.map(|v| v.value()).unwrap_or(0) + 1;
    counters.insert(key, next)?;
    Ok(next)
}

#[cfg(test)]
pub(crate) fn temp_db() -> (MarketDb, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = MarketDb::open(&dir.path().join("test.redb")).unwrap();
    (db, dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use redb::ReadableDatabase;

    #[test]
    fn open_creates_tables_and_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("market.redb");
        let db = MarketDb::open(&path).unwrap();

        // Read transactions on fresh tables succeed because open pre-creates them
        let read_txn = db.database().begin_read().unwrap();
        let users = read_txn.open_table(USERS).unwrap();
        assert!(users.get(1).unwrap().is_none());
    }

    #[test]
    fn next_id_is_sequential() {
        let (db, _dir) = temp_db();
        let write_txn = db.database().begin_write().unwrap();
        {
            let mut counters = write_txn.open_table(COUNTERS).unwrap();
            assert_eq!(next_id(&mut counters, "users").unwrap(), 1);
            assert_eq!(next_id(&mut counters, "users").unwrap(), 2);
            assert_eq!(next_id(&mut counters, "orders").unwrap(), 1);
        }
        write_txn.commit().unwrap();
    }
}
