//! Relationship index.
//!
//! Precomputed id-keyed lookups between related entities, replacing
//! navigation-property traversal. The index stores row positions into an
//! [`EntityStore`] and must be queried with the store it was built from;
//! [`Catalog`](crate::Catalog) keeps the two paired.

use crate::model::*;
use crate::store::{EntityStore, Record, Table};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

type Positions<K> = HashMap<K, Vec<usize>>;

/// Lookups from an owning row to the rows that reference it
#[derive(Debug, Clone, Default)]
pub struct RelationshipIndex {
    orders_by_customer: Positions<CustomerId>,
    items_by_order: Positions<OrderId>,
    items_by_product: Positions<ProductId>,
    stocks_by_product: Positions<ProductId>,
    stocks_by_store: Positions<StoreId>,
    categories_by_product: Positions<ProductId>,
}

impl RelationshipIndex {
    /// Derives the index from a loaded store. Positions within each list
    /// follow the store's load order.
    pub fn build(store: &EntityStore) -> Self {
        let mut index = RelationshipIndex::default();

        for (pos, order) in store.orders().iter().enumerate() {
            push(&mut index.orders_by_customer, order.customer_id, pos);
        }

        for (pos, item) in store.order_items().iter().enumerate() {
            push(&mut index.items_by_order, item.order_id, pos);
            push(&mut index.items_by_product, item.product_id, pos);
        }

        for (pos, stock) in store.stocks().iter().enumerate() {
            push(&mut index.stocks_by_product, stock.product_id, pos);
            push(&mut index.stocks_by_store, stock.store_id, pos);
        }

        for product in store.products() {
            let mut seen = Vec::with_capacity(product.category_ids.len());
            for &category_id in &product.category_ids {
                if let Some(pos) = store.categories().position(category_id) {
                    if !seen.contains(&pos) {
                        seen.push(pos);
                    }
                }
            }
            if !seen.is_empty() {
                index.categories_by_product.insert(product.id, seen);
            }
        }

        debug!(
            customers_with_orders = index.orders_by_customer.len(),
            orders_with_items = index.items_by_order.len(),
            products_stocked = index.stocks_by_product.len(),
            "relationship index built"
        );

        index
    }

    /// Orders placed by a customer
    pub fn orders_of<'a>(
        &'a self,
        store: &'a EntityStore,
        customer_id: CustomerId,
    ) -> impl Iterator<Item = &'a Order> + Clone + 'a {
        resolve(&self.orders_by_customer, customer_id, store.orders())
    }

    /// Lines of an order
    pub fn items_of<'a>(
        &'a self,
        store: &'a EntityStore,
        order_id: OrderId,
    ) -> impl Iterator<Item = &'a OrderItem> + Clone + 'a {
        resolve(&self.items_by_order, order_id, store.order_items())
    }

    /// Order lines that sold a product
    pub fn items_for_product<'a>(
        &'a self,
        store: &'a EntityStore,
        product_id: ProductId,
    ) -> impl Iterator<Item = &'a OrderItem> + Clone + 'a {
        resolve(&self.items_by_product, product_id, store.order_items())
    }

    /// Stock rows for a product across all stores
    pub fn stocks_of<'a>(
        &'a self,
        store: &'a EntityStore,
        product_id: ProductId,
    ) -> impl Iterator<Item = &'a Stock> + Clone + 'a {
        resolve(&self.stocks_by_product, product_id, store.stocks())
    }

    /// Stock rows held by a store
    pub fn stocks_in<'a>(
        &'a self,
        store: &'a EntityStore,
        store_id: StoreId,
    ) -> impl Iterator<Item = &'a Stock> + Clone + 'a {
        resolve(&self.stocks_by_store, store_id, store.stocks())
    }

    /// Distinct categories of a product, in the order the product lists them
    pub fn categories_of<'a>(
        &'a self,
        store: &'a EntityStore,
        product_id: ProductId,
    ) -> impl Iterator<Item = &'a Category> + Clone + 'a {
        resolve(&self.categories_by_product, product_id, store.categories())
    }
}

fn push<K: Hash + Eq>(map: &mut Positions<K>, key: K, pos: usize) {
    map.entry(key).or_default().push(pos);
}

fn resolve<'a, K, T>(
    map: &'a Positions<K>,
    key: K,
    table: &'a Table<T>,
) -> impl Iterator<Item = &'a T> + Clone + 'a
where
    K: Hash + Eq + 'a,
    T: Record,
{
    let rows = table.rows();
    map.get(&key)
        .into_iter()
        .flatten()
        .filter_map(move |&pos| rows.get(pos))
}
