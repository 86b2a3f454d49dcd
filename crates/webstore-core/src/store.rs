//! Entity store.
//!
//! Holds one [`Table`] per entity kind. Tables keep rows in load order and
//! index them by primary key. The store is built once by
//! [`EntityStore::load`], which enforces referential integrity, and is
//! read-only afterwards.

use crate::error::{Error, Result};
use crate::model::*;
use crate::validate::{validate_order_item, validate_product};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, warn};

/// A row with a primary key
pub trait Record {
    /// Primary key type
    type Key: Copy + Eq + Hash + Debug;

    /// Entity kind name used in diagnostics
    const KIND: &'static str;

    /// Returns the primary key of this row
    fn key(&self) -> Self::Key;
}

impl Record for Customer {
    type Key = CustomerId;
    const KIND: &'static str = "customer";

    fn key(&self) -> CustomerId {
        self.id
    }
}

impl Record for Product {
    type Key = ProductId;
    const KIND: &'static str = "product";

    fn key(&self) -> ProductId {
        self.id
    }
}

impl Record for Category {
    type Key = CategoryId;
    const KIND: &'static str = "category";

    fn key(&self) -> CategoryId {
        self.id
    }
}

impl Record for Store {
    type Key = StoreId;
    const KIND: &'static str = "store";

    fn key(&self) -> StoreId {
        self.id
    }
}

impl Record for Stock {
    type Key = (StoreId, ProductId);
    const KIND: &'static str = "stock";

    fn key(&self) -> (StoreId, ProductId) {
        (self.store_id, self.product_id)
    }
}

impl Record for Order {
    type Key = OrderId;
    const KIND: &'static str = "order";

    fn key(&self) -> OrderId {
        self.id
    }
}

impl Record for OrderItem {
    type Key = (OrderId, u32);
    const KIND: &'static str = "order item";

    fn key(&self) -> (OrderId, u32) {
        (self.order_id, self.item_id)
    }
}

/// Rows of one entity kind in load order, with O(1) lookup by key
#[derive(Debug, Clone)]
pub struct Table<T: Record> {
    rows: Vec<T>,
    positions: HashMap<T::Key, usize>,
}

impl<T: Record> Table<T> {
    /// Builds a table, rejecting duplicate keys
    pub fn from_rows(rows: Vec<T>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(rows.len());

        for (pos, row) in rows.iter().enumerate() {
            if positions.insert(row.key(), pos).is_some() {
                return Err(reject(format!(
                    "duplicate {} key {:?}",
                    T::KIND,
                    row.key()
                )));
            }
        }

        Ok(Self { rows, positions })
    }

    /// Looks up a row by primary key
    pub fn get(&self, key: T::Key) -> Option<&T> {
        self.positions.get(&key).map(|&pos| &self.rows[pos])
    }

    /// Returns true if a row with this key exists
    pub fn contains(&self, key: T::Key) -> bool {
        self.positions.contains_key(&key)
    }

    /// Position of a row in load order
    pub fn position(&self, key: T::Key) -> Option<usize> {
        self.positions.get(&key).copied()
    }

    /// Iterates rows in load order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    /// All rows in load order
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a, T: Record> IntoIterator for &'a Table<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// In-memory holder of every entity kind
#[derive(Debug, Clone)]
pub struct EntityStore {
    customers: Table<Customer>,
    products: Table<Product>,
    categories: Table<Category>,
    stores: Table<Store>,
    stocks: Table<Stock>,
    orders: Table<Order>,
    order_items: Table<OrderItem>,
}

impl EntityStore {
    /// Builds a store from raw rows.
    ///
    /// # Errors
    ///
    /// Returns `Error::Load` if a primary key is duplicated, a foreign key
    /// points at a missing row, or a row violates a value constraint.
    pub fn load(dataset: Dataset) -> Result<Self> {
        let Dataset {
            customers,
            products,
            categories,
            stores,
            stocks,
            orders,
            order_items,
        } = dataset;

        let store = EntityStore {
            customers: Table::from_rows(customers)?,
            products: Table::from_rows(products)?,
            categories: Table::from_rows(categories)?,
            stores: Table::from_rows(stores)?,
            stocks: Table::from_rows(stocks)?,
            orders: Table::from_rows(orders)?,
            order_items: Table::from_rows(order_items)?,
        };

        store.check_integrity()?;

        debug!(
            customers = store.customers.len(),
            products = store.products.len(),
            categories = store.categories.len(),
            stores = store.stores.len(),
            stocks = store.stocks.len(),
            orders = store.orders.len(),
            order_items = store.order_items.len(),
            "entity store loaded"
        );

        Ok(store)
    }

    fn check_integrity(&self) -> Result<()> {
        for product in &self.products {
            validate_product(product).map_err(logged)?;
            for &category_id in &product.category_ids {
                if !self.categories.contains(category_id) {
                    return Err(reject(format!(
                        "product {} references unknown category {}",
                        product.id, category_id
                    )));
                }
            }
        }

        for stock in &self.stocks {
            if !self.stores.contains(stock.store_id) {
                return Err(reject(format!(
                    "stock {:?} references unknown store {}",
                    stock.key(),
                    stock.store_id
                )));
            }
            if !self.products.contains(stock.product_id) {
                return Err(reject(format!(
                    "stock {:?} references unknown product {}",
                    stock.key(),
                    stock.product_id
                )));
            }
        }

        for order in &self.orders {
            if !self.customers.contains(order.customer_id) {
                return Err(reject(format!(
                    "order {} references unknown customer {}",
                    order.id, order.customer_id
                )));
            }
        }

        for item in &self.order_items {
            if !self.orders.contains(item.order_id) {
                return Err(reject(format!(
                    "order item {}/{} references unknown order {}",
                    item.order_id, item.item_id, item.order_id
                )));
            }
            if !self.products.contains(item.product_id) {
                return Err(reject(format!(
                    "order item {}/{} references unknown product {}",
                    item.order_id, item.item_id, item.product_id
                )));
            }
            validate_order_item(item).map_err(logged)?;
        }

        Ok(())
    }

    pub fn customers(&self) -> &Table<Customer> {
        &self.customers
    }

    pub fn products(&self) -> &Table<Product> {
        &self.products
    }

    pub fn categories(&self) -> &Table<Category> {
        &self.categories
    }

    pub fn stores(&self) -> &Table<Store> {
        &self.stores
    }

    pub fn stocks(&self) -> &Table<Stock> {
        &self.stocks
    }

    pub fn orders(&self) -> &Table<Order> {
        &self.orders
    }

    pub fn order_items(&self) -> &Table<OrderItem> {
        &self.order_items
    }
}

fn reject(msg: String) -> Error {
    logged(Error::Load(msg))
}

fn logged(err: Error) -> Error {
    warn!(error = %err, "rejected dataset");
    err
}
