// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Orders and the wallet settlement that rides along with them.
//!
//! Placing an order credits the chef's wallet with 90% of the item price in
//! the same write transaction that inserts the order row. Cancelling a
//! non-terminal order reverses that credit, again atomically with the status
//! flip.

use redb::{ReadableDatabase, ReadableTable};
use rust_decimal::Decimal;

use crate::models::{Order, OrderStatus, Wallet};

use super::{next_id, MarketDb, StoreError, StoreResult, COUNTERS, MENU_ITEMS, ORDERS, WALLETS};

/// Chef share of an order: 90% of the item price, rounded to cents.
pub fn settlement_credit(price: Decimal) -> Decimal {
    (price * Decimal::new(9, 1)).round_dp(2)
}

impl MarketDb {
    /// Place an order for a menu item and settle the chef's share.
    ///
    /// The order insert and the wallet credit commit together. Any error exit
    /// drops the write transaction and leaves both tables untouched.
    pub fn place_order(
        &self,
        customer_id: u64,
        menu_item_id: u64,
        delivery_address: &str,
    ) -> StoreResult<Order> {
        let write_txn = self.db.begin_write()?;
        let order = {
            let menu_items = write_txn.open_table(MENU_ITEMS)?;
            let mut orders = write_txn.open_table(ORDERS)?;
            let mut wallets = write_txn.open_table(WALLETS)?;
            let mut counters = write_txn.open_table(COUNTERS)?;

            let item: crate::models::MenuItem = match menu_items.get(menu_item_id)? {
                Some(v) => serde_json::from_slice(v.value())?,
                None => return Err(StoreError::ItemUnavailable),
            };
            if !item.available {
                return Err(StoreError::ItemUnavailable);
            }

            let id = next_id(&mut counters, "orders")?;
            let order = Order {
                id,
                customer_id,
                chef_id: item.chef_id,
                menu_item_id,
                total_price: item.price,
                delivery_address: delivery_address.to_string(),
                status: OrderStatus::Pending,
            };
            orders.insert(id, serde_json::to_vec(&order)?.as_slice())?;

            let mut wallet: Wallet = match wallets.get(item.chef_id)? {
                Some(v) => serde_json::from_slice(v.value())?,
                None => return Err(StoreError::MissingWallet(item.chef_id)),
            };
            wallet.balance += settlement_credit(item.price);
            wallets.insert(item.chef_id, serde_json::to_vec(&wallet)?.as_slice())?;

            order
        };
        write_txn.commit()?;

        tracing::info!(
            order_id = order.id,
            customer_id,
            chef_id = order.chef_id,
            %order.total_price,
            "order placed"
        );
        Ok(order)
    }

    /// Look up an order by id.
    pub fn get_order(&self, id: u64) -> StoreResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let orders = read_txn.open_table(ORDERS)?;
        match orders.get(id)? {
            Some(v) => Ok(Some(serde_json::from_slice(v.value())?)),
            None => Ok(None),
        }
    }

    /// Move an owned, pending order to a new status.
    ///
    /// Only the ordering customer may edit, only pending orders can move, and
    /// pending is never a valid target. Moving to cancelled reverses the
    /// chef's settlement credit.
    pub fn edit_order(
        &self,
        order_id: u64,
        customer_id: u64,
        new_status: OrderStatus,
    ) -> StoreResult<Order> {
        if new_status == OrderStatus::Pending {
            return Err(StoreError::InvalidTransition(
                "Cannot set an order back to pending".to_string(),
            ));
        }

        let write_txn = self.db.begin_write()?;
        let order = {
            let mut orders = write_txn.open_table(ORDERS)?;

            let mut order: Order = {
                let found: Option<Order> = match orders.get(order_id)? {
                    Some(v) => Some(serde_json::from_slice(v.value())?),
                    None => None,
                };
                match found {
                    Some(o) if o.customer_id == customer_id => o,
                    _ => {
                        return Err(StoreError::NotFound(
                            "Order not found or not owned by you".to_string(),
                        ))
                    }
                }
            };

            if order.status != OrderStatus::Pending {
                return Err(StoreError::InvalidTransition(
                    "Only pending orders can be edited".to_string(),
                ));
            }

            order.status = new_status;
            orders.insert(order_id, serde_json::to_vec(&order)?.as_slice())?;

            if new_status == OrderStatus::Cancelled {
                let mut wallets = write_txn.open_table(WALLETS)?;
                reverse_settlement(&mut wallets, &order)?;
            }

            order
        };
        write_txn.commit()?;

        tracing::info!(order_id, status = %order.status, "order status updated");
        Ok(order)
    }

    /// Cancel an order on behalf of the ordering customer.
    ///
    /// Checks run in a fixed sequence: a missing order reports not-found
    /// before any state or ownership check, and a terminal order reports its
    /// state before ownership.
    pub fn cancel_order(&self, order_id: u64, customer_id: u64) -> StoreResult<Order> {
        let write_txn = self.db.begin_write()?;
        let order = {
            let mut orders = write_txn.open_table(ORDERS)?;

            let mut order: Order = {
                let found: Option<Order> = match orders.get(order_id)? {
                    Some(v) => Some(serde_json::from_slice(v.value())?),
                    None => None,
                };
                match found {
                    Some(o) => o,
                    None => return Err(StoreError::NotFound("Order not found".to_string())),
                }
            };

            if order.status.is_terminal() {
                return Err(StoreError::InvalidTransition(
                    "Order cannot be cancelled in its current state".to_string(),
                ));
            }
            if order.customer_id != customer_id {
                return Err(StoreError::Forbidden(
                    "You can only cancel your own orders".to_string(),
                ));
            }

            order.status = OrderStatus::Cancelled;
            orders.insert(order_id, serde_json::to_vec(&order)?.as_slice())?;

            let mut wallets = write_txn.open_table(WALLETS)?;
            reverse_settlement(&mut wallets, &order)?;

            order
        };
        write_txn.commit()?;

        tracing::info!(order_id, customer_id, "order cancelled");
        Ok(order)
    }
}

/// Debit the settlement credit back out of the chef's wallet.
///
/// The chef may have spent the credit already, so the debit saturates at
/// zero rather than driving the balance negative. A missing wallet means the
/// chef account was deleted and there is nothing left to reverse.
fn reverse_settlement(
    wallets: &mut redb::Table<u64, &[u8]>,
    order: &Order,
) -> StoreResult<()> {
    let mut wallet: Wallet = {
        let found: Option<Wallet> = match wallets.get(order.chef_id)? {
            Some(v) => Some(serde_json::from_slice(v.value())?),
            None => None,
        };
        match found {
            Some(w) => w,
            None => return Ok(()),
        }
    };

    let credit = settlement_credit(order.total_price);
    if credit > wallet.balance {
        tracing::warn!(
            chef_id = order.chef_id,
            order_id = order.id,
            %credit,
            balance = %wallet.balance,
            "settlement reversal clamped to available balance"
        );
        wallet.balance = Decimal::ZERO;
    } else {
        wallet.balance -= credit;
    }
    wallets.insert(order.chef_id, serde_json::to_vec(&wallet)?.as_slice())?;
    Ok(())
}
