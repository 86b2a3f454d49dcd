//! Report builders.
//!
//! Ten read-only reports, each a pure function of a [`Catalog`] composed from
//! the query operators and the relationship index. Builders that resolve a
//! reference return `Result`; a failed lookup there is an
//! [`Error::Referential`](webstore_core::Error::Referential), never an empty
//! result in disguise.

use crate::config::DiscountListing;
use std::fmt;
use tracing::debug;
use webstore_core::query::{
    filter, group_by, hash_join, line_total, max_by, order_by_descending, sum, top_n, Query,
};
use webstore_core::{
    Catalog, CustomerId, Money, Order, OrderId, OrderStatus, ProductId, Result, StoreId,
    Timestamp, SECONDS_PER_DAY,
};

/// Customer name and email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub full_name: String,
    pub email: String,
}

/// An order with the total quantity of its lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemCountRow {
    pub order_id: OrderId,
    pub customer_name: String,
    pub status: OrderStatus,
    pub item_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPriceRow {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
}

/// A pending order with its discounted total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrderRow {
    pub order_id: OrderId,
    pub customer_name: String,
    pub order_date: Timestamp,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerOrderCountRow {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub order_count: usize,
}

/// Lifetime order value of a customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerValueRow {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentOrderRow {
    pub order_id: OrderId,
    pub order_date: Timestamp,
    pub customer_name: String,
}

/// Units sold of one product across all orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSalesRow {
    pub product_id: ProductId,
    pub product_name: String,
    pub total_sold: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountLine {
    pub product_name: String,
    pub discount: Money,
}

/// An order carrying at least one discounted line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountedOrderRow {
    pub order_id: OrderId,
    pub customer_name: String,
    pub lines: Vec<DiscountLine>,
}

/// Store holding the most units of a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLevel {
    pub store_id: StoreId,
    pub store_name: String,
    pub quantity: u32,
}

/// A sold product of the requested category and where it is stocked most
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLeaderRow {
    pub product_id: ProductId,
    pub product_name: String,
    /// `None` when the product has no stock rows
    pub max_stock: Option<StockLevel>,
}

/// Discounted value of an order
pub fn order_total(catalog: &Catalog, order_id: OrderId) -> Money {
    sum(catalog.items_of(order_id), line_total)
}

/// 1. Every customer's full name and email, in load order.
pub fn all_customers(catalog: &Catalog) -> Vec<CustomerRow> {
    Query::new(catalog.store().customers())
        .map(|customer| CustomerRow {
            full_name: customer.full_name(),
            email: customer.email.clone(),
        })
        .execute()
}

/// 2. Every order with its customer, status and total item quantity.
pub fn orders_with_item_count(catalog: &Catalog) -> Result<Vec<OrderItemCountRow>> {
    catalog
        .store()
        .orders()
        .iter()
        .map(|order| {
            let customer = catalog.customer_of(order)?;
            Ok(OrderItemCountRow {
                order_id: order.id,
                customer_name: customer.full_name(),
                status: order.status,
                item_count: sum(catalog.items_of(order.id), |item| u64::from(item.quantity)),
            })
        })
        .collect()
}

/// 3. Products from most to least expensive; equal prices keep load order.
pub fn products_by_price(catalog: &Catalog) -> Vec<ProductPriceRow> {
    Query::new(catalog.store().products())
        .order_by_descending(|product| product.price)
        .map(|product| ProductPriceRow {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
        })
        .execute()
}

/// 4. Pending orders with their discounted totals.
pub fn pending_orders(catalog: &Catalog) -> Result<Vec<PendingOrderRow>> {
    filter(catalog.store().orders(), |order| {
        order.status == OrderStatus::Pending
    })
    .map(|order| {
        Ok(PendingOrderRow {
            order_id: order.id,
            customer_name: catalog.customer_of(order)?.full_name(),
            order_date: order.order_date,
            total: order_total(catalog, order.id),
        })
    })
    .collect()
}

/// 5. Number of orders per customer.
///
/// Orders are joined to customers and grouped, so customers without orders
/// do not appear. Groups are listed in the order of each customer's first
/// order.
pub fn order_count_per_customer(catalog: &Catalog) -> Vec<CustomerOrderCountRow> {
    let store = catalog.store();
    let joined = hash_join(
        store.orders(),
        store.customers(),
        |order| order.customer_id,
        |customer| customer.id,
    );

    group_by(joined, |(_, customer)| customer.id)
        .into_iter()
        .filter_map(|(customer_id, orders)| {
            let (_, customer) = orders.first()?;
            Some(CustomerOrderCountRow {
                customer_id,
                customer_name: customer.full_name(),
                order_count: orders.len(),
            })
        })
        .collect()
}

/// 6. The `n` customers with the highest lifetime order value.
///
/// Every customer takes part, those without orders with a total of zero.
/// Equal totals keep customer load order.
pub fn top_customers_by_value(catalog: &Catalog, n: usize) -> Vec<CustomerValueRow> {
    let totals = catalog.store().customers().iter().map(|customer| CustomerValueRow {
        customer_id: customer.id,
        customer_name: customer.full_name(),
        total: sum(catalog.orders_of(customer.id), |order| {
            order_total(catalog, order.id)
        }),
    });

    top_n(order_by_descending(totals, |row| row.total), n).collect()
}

/// First instant inside a trailing window of `window_days` ending at `now`
pub fn window_start(now: Timestamp, window_days: u64) -> Timestamp {
    now.saturating_sub(window_days.saturating_mul(SECONDS_PER_DAY))
}

/// 7. Orders placed within the trailing window ending at `now`.
///
/// The window is closed at its start: an order dated exactly `window_days`
/// before `now` is included.
pub fn recent_orders(
    catalog: &Catalog,
    now: Timestamp,
    window_days: u64,
) -> Result<Vec<RecentOrderRow>> {
    let since = window_start(now, window_days);

    let rows = filter(catalog.store().orders(), |order| order.order_date >= since)
        .map(|order| {
            Ok(RecentOrderRow {
                order_id: order.id,
                order_date: order.order_date,
                customer_name: catalog.customer_of(order)?.full_name(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(since, rows = rows.len(), "recent orders");
    Ok(rows)
}

/// 8. Units sold per product, best sellers first.
///
/// Order lines are grouped by product and their quantities summed; products
/// that never sold are absent. Equal totals keep the order in which each
/// product first appears among the order lines.
pub fn total_sold_per_product(catalog: &Catalog) -> Result<Vec<ProductSalesRow>> {
    let groups = group_by(catalog.store().order_items(), |item| item.product_id);

    let mut rows = Vec::with_capacity(groups.len());
    for (product_id, items) in groups {
        let Some(first) = items.first() else {
            continue;
        };
        let product = catalog.product_of(first)?;
        rows.push(ProductSalesRow {
            product_id,
            product_name: product.name.clone(),
            total_sold: sum(items, |item| u64::from(item.quantity)),
        });
    }

    debug!(products = rows.len(), "sales grouped by product");
    Ok(order_by_descending(rows, |row| row.total_sold))
}

fn has_discount(catalog: &Catalog, order: &Order) -> bool {
    catalog
        .items_of(order.id)
        .any(|item| item.discount > Money::ZERO)
}

/// 9. Orders with at least one discounted line.
///
/// `listing` decides whether each row lists only the discounted lines or
/// every line of the order.
pub fn discounted_orders(
    catalog: &Catalog,
    listing: DiscountListing,
) -> Result<Vec<DiscountedOrderRow>> {
    filter(catalog.store().orders(), |order| has_discount(catalog, order))
        .map(|order| {
            let lines = catalog
                .items_of(order.id)
                .filter(|item| match listing {
                    DiscountListing::DiscountedOnly => item.discount > Money::ZERO,
                    DiscountListing::AllItems => true,
                })
                .map(|item| {
                    Ok(DiscountLine {
                        product_name: catalog.product_of(item)?.name.clone(),
                        discount: item.discount,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(DiscountedOrderRow {
                order_id: order.id,
                customer_name: catalog.customer_of(order)?.full_name(),
                lines,
            })
        })
        .collect()
}

/// 10. Sold products of a category and the store holding most of each.
///
/// A product qualifies when one of its categories is named `category` and
/// at least one order line sold it. Among its stock rows the largest quantity
/// wins, the first row on ties.
pub fn category_stock_leaders(catalog: &Catalog, category: &str) -> Result<Vec<StockLeaderRow>> {
    let in_category = |product_id: ProductId| {
        catalog
            .categories_of(product_id)
            .any(|c| c.name == category)
    };

    filter(catalog.store().products(), |product| {
        in_category(product.id) && catalog.items_for_product(product.id).next().is_some()
    })
    .map(|product| {
        let max_stock = match max_by(catalog.stocks_of(product.id), |stock| stock.quantity) {
            Some(stock) => Some(StockLevel {
                store_id: stock.store_id,
                store_name: catalog.store_of(stock)?.name.clone(),
                quantity: stock.quantity,
            }),
            None => None,
        };

        Ok(StockLeaderRow {
            product_id: product.id,
            product_name: product.name.clone(),
            max_stock,
        })
    })
    .collect()
}

impl fmt::Display for CustomerRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.full_name, self.email)
    }
}

impl fmt::Display for OrderItemCountRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} items: {}",
            self.order_id, self.customer_name, self.status, self.item_count
        )
    }
}

impl fmt::Display for ProductPriceRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {}", self.product_id, self.name, self.price)
    }
}

impl fmt::Display for PendingOrderRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} date: {} total: {}",
            self.order_id, self.customer_name, self.order_date, self.total
        )
    }
}

impl fmt::Display for CustomerOrderCountRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} orders: {}", self.customer_name, self.order_count)
    }
}

impl fmt::Display for CustomerValueRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} total: {}", self.customer_name, self.total)
    }
}

impl fmt::Display for RecentOrderRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} date: {} {}",
            self.order_id, self.order_date, self.customer_name
        )
    }
}

impl fmt::Display for ProductSalesRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sold: {}", self.product_name, self.total_sold)
    }
}

impl fmt::Display for DiscountedOrderRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.order_id, self.customer_name)?;
        for line in &self.lines {
            write!(f, "\n    {} discount: {}", line.product_name, line.discount)?;
        }
        Ok(())
    }
}

impl fmt::Display for StockLeaderRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.max_stock {
            Some(level) => write!(
                f,
                "{} most stocked at {} (store {}): {}",
                self.product_name, level.store_name, level.store_id, level.quantity
            ),
            None => write!(f, "{} not stocked anywhere", self.product_name),
        }
    }
}
