// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Catalog: chef-owned menu items.

use redb::{ReadableDatabase, ReadableTable};
use rust_decimal::Decimal;

use crate::models::MenuItem;

use super::{next_id, MarketDb, StoreError, StoreResult, COUNTERS, MENU_ITEMS, ORDERS};

impl MarketDb {
    /// Publish a new menu item owned by the given chef.
    pub fn create_menu_item(
        &self,
        chef_id: u64,
        name: &str,
        description: &str,
        price: Decimal,
        available: bool,
    ) -> StoreResult<MenuItem> {
        validate_price(price)?;

        let write_txn = self.db.begin_write()?;
        let item = {
            let mut menu_items = write_txn.open_table(MENU_ITEMS)?;
            let mut counters = write_txn.open_table(COUNTERS)?;

            let id = next_id(&mut counters, "menu_items")?;
            let item = MenuItem {
                id,
                chef_id,
                name: name.to_string(),
                description: description.to_string(),
                price,
                available,
            };
            menu_items.insert(id, serde_json::to_vec(&item)?.as_slice())?;
            item
        };
        write_txn.commit()?;
        Ok(item)
    }

    /// Look up a menu item by id.
    pub fn get_menu_item(&self, id: u64) -> StoreResult<Option<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let menu_items = read_txn.open_table(MENU_ITEMS)?;
        match menu_items.get(id)? {
            Some(v) => Ok(Some(serde_json::from_slice(v.value())?)),
            None => Ok(None),
        }
    }

    /// Overwrite name/description/price/available of an owned menu item.
    ///
    /// A missing item and an item owned by another chef are indistinguishable
    /// to the caller.
    pub fn update_menu_item(
        &self,
        item_id: u64,
        chef_id: u64,
        name: &str,
        description: &str,
        price: Decimal,
        available: bool,
    ) -> StoreResult<MenuItem> {
        validate_price(price)?;

        let write_txn = self.db.begin_write()?;
        let item = {
            let mut menu_items = write_txn.open_table(MENU_ITEMS)?;

            let mut item = owned_item(&menu_items, item_id, chef_id)?;
            item.name = name.to_string();
            item.description = description.to_string();
            item.price = price;
            item.available = available;
            menu_items.insert(item_id, serde_json::to_vec(&item)?.as_slice())?;
            item
        };
        write_txn.commit()?;
        Ok(item)
    }

    /// Remove an owned menu item.
    ///
    /// Deletion is blocked while any non-terminal order references the item;
    /// completed and cancelled orders keep their price snapshot and do not
    /// block.
    pub fn delete_menu_item(&self, item_id: u64, chef_id: u64) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut menu_items = write_txn.open_table(MENU_ITEMS)?;
            owned_item(&menu_items, item_id, chef_id)?;

            let orders = write_txn.open_table(ORDERS)?;
            for entry in orders.range(0..=u64::MAX)? {
                let (_, value) = entry?;
                let order: crate::models::Order = serde_json::from_slice(value.value())?;
                if order.menu_item_id == item_id && !order.status.is_terminal() {
                    return Err(StoreError::Validation(
                        "Menu item is referenced by active orders".to_string(),
                    ));
                }
            }

            menu_items.remove(item_id)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

fn validate_price(price: Decimal) -> StoreResult<()> {
    if price.is_sign_negative() {
        return Err(StoreError::Validation(
            "price must be non-negative".to_string(),
        ));
    }
    Ok(())
}

/// Fetch an item only if it belongs to the given chef.
fn owned_item<T>(menu_items: &T, item_id: u64, chef_id: u64) -> StoreResult<MenuItem>
where
    T: ReadableTable<u64, &'static [u8]>,
{
    let item: Option<MenuItem> = match menu_items.get(item_id)? {
        Some(v) => Some(serde_json::from_slice(v.value())?),
        None => None,
    };
    match item {
        Some(item) if item.chef_id == chef_id => Ok(item),
        _ => Err(StoreError::NotFound(
            "Menu item not found or not owned by you".to_string(),
        )),
    }
}
