//! # WebStore Core
//!
//! Entity store, relationship index and query operators for WebStore.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! **This crate is an internal implementation detail of WebStore.**
//!
//! Users should depend on the main `webstore` crate instead, which provides
//! the stable public API.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod index;
#[allow(missing_docs)]
pub mod model;
pub mod query;
#[allow(missing_docs)]
pub mod store;
pub mod validate;

pub use error::{Error, Result};
pub use index::RelationshipIndex;
pub use model::*;
pub use store::{EntityStore, Record, Table};

/// An immutable entity store paired with the index built from it.
///
/// Reports run against a `Catalog`; since neither half can change after
/// construction, running a report twice yields the same rows.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: EntityStore,
    index: RelationshipIndex,
}

impl Catalog {
    /// Validates a dataset and builds its index.
    pub fn load(dataset: Dataset) -> Result<Self> {
        Ok(Self::from_store(EntityStore::load(dataset)?))
    }

    /// Builds the index for an already loaded store.
    pub fn from_store(store: EntityStore) -> Self {
        let index = RelationshipIndex::build(&store);
        Catalog { store, index }
    }

    /// The underlying entity store
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// The relationship index
    pub fn index(&self) -> &RelationshipIndex {
        &self.index
    }

    /// Orders placed by a customer
    pub fn orders_of(&self, customer_id: CustomerId) -> impl Iterator<Item = &Order> + Clone {
        self.index.orders_of(&self.store, customer_id)
    }

    /// Lines of an order
    pub fn items_of(&self, order_id: OrderId) -> impl Iterator<Item = &OrderItem> + Clone {
        self.index.items_of(&self.store, order_id)
    }

    /// Order lines that sold a product
    pub fn items_for_product(
        &self,
        product_id: ProductId,
    ) -> impl Iterator<Item = &OrderItem> + Clone {
        self.index.items_for_product(&self.store, product_id)
    }

    /// Stock rows for a product
    pub fn stocks_of(&self, product_id: ProductId) -> impl Iterator<Item = &Stock> + Clone {
        self.index.stocks_of(&self.store, product_id)
    }

    /// Stock rows held by a store
    pub fn stocks_in(&self, store_id: StoreId) -> impl Iterator<Item = &Stock> + Clone {
        self.index.stocks_in(&self.store, store_id)
    }

    /// Distinct categories of a product
    pub fn categories_of(&self, product_id: ProductId) -> impl Iterator<Item = &Category> + Clone {
        self.index.categories_of(&self.store, product_id)
    }

    /// Resolves the customer of an order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Referential` if the customer is missing, which the load
    /// invariants rule out.
    pub fn customer_of(&self, order: &Order) -> Result<&Customer> {
        self.store.customers().get(order.customer_id).ok_or_else(|| {
            Error::missing("customer", order.customer_id, &format!("order {}", order.id))
        })
    }

    /// Resolves the product of an order line.
    pub fn product_of(&self, item: &OrderItem) -> Result<&Product> {
        self.store.products().get(item.product_id).ok_or_else(|| {
            Error::missing(
                "product",
                item.product_id,
                &format!("order item {}/{}", item.order_id, item.item_id),
            )
        })
    }

    /// Resolves the store holding a stock row.
    pub fn store_of(&self, stock: &Stock) -> Result<&Store> {
        self.store.stores().get(stock.store_id).ok_or_else(|| {
            Error::missing(
                "store",
                stock.store_id,
                &format!("stock of product {}", stock.product_id),
            )
        })
    }
}
