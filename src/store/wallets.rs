// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chef wallet reads and withdrawals. Credits happen in the orders module.

use redb::{ReadableDatabase, ReadableTable};
use rust_decimal::Decimal;

use crate::models::Wallet;

use super::{MarketDb, StoreError, StoreResult, WALLETS};

impl MarketDb {
    /// Current wallet balance for a chef.
    pub fn balance(&self, chef_id: u64) -> StoreResult<Decimal> {
        let read_txn = self.db.begin_read()?;
        let wallets = read_txn.open_table(WALLETS)?;
        match wallets.get(chef_id)? {
            Some(v) => {
                let wallet: Wallet = serde_json::from_slice(v.value())?;
                Ok(wallet.balance)
            }
            None => Err(StoreError::NotFound("Wallet not found".to_string())),
        }
    }

    /// Withdraw funds from a chef's wallet.
    ///
    /// The balance check and the debit share one write transaction, so two
    /// concurrent withdrawals cannot both succeed against the same funds.
    pub fn withdraw(&self, chef_id: u64, amount: Decimal) -> StoreResult<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(StoreError::Validation(
                "Withdrawal amount must be positive".to_string(),
            ));
        }

        let write_txn = self.db.begin_write()?;
        let remaining = {
            let mut wallets = write_txn.open_table(WALLETS)?;

            let mut wallet: Wallet = {
                let found: Option<Wallet> = match wallets.get(chef_id)? {
                    Some(v) => Some(serde_json::from_slice(v.value())?),
                    None => None,
                };
                match found {
                    Some(w) => w,
                    None => return Err(StoreError::InsufficientFunds),
                }
            };

            if amount > wallet.balance {
                return Err(StoreError::InsufficientFunds);
            }
            wallet.balance -= amount;
            wallets.insert(chef_id, serde_json::to_vec(&wallet)?.as_slice())?;
            wallet.balance
        };
        write_txn.commit()?;

        tracing::info!(chef_id, %amount, %remaining, "withdrawal settled");
        Ok(remaining)
    }
}
