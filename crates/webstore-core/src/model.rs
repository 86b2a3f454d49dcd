//! Entity rows and value types.
//!
//! Rows are plain data: they are produced by a data source, validated once by
//! [`EntityStore::load`](crate::store::EntityStore::load) and never mutated
//! afterwards.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

pub type CustomerId = u64;
pub type ProductId = u64;
pub type CategoryId = u64;
pub type StoreId = u64;
pub type OrderId = u64;

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// Seconds in one day
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// A currency amount in minor units (cents).
///
/// `+`, `-`, `*` and `Sum` saturate at the `i64` bounds instead of
/// overflowing. Load validation rejects any order line whose subtotal does
/// not fit, so saturation only shows up in aggregates over extreme data.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Zero amount
    pub const ZERO: Money = Money(0);

    /// Creates an amount from minor units
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates an amount from whole units and cents, e.g. `Money::new(12, 50)` is 12.50
    pub const fn new(units: i64, cents: i64) -> Self {
        Money(units * 100 + cents)
    }

    /// Returns the amount in minor units
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns true for amounts below zero
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a quantity, `None` on overflow
    pub fn checked_mul(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(quantity)).map(Money)
    }

    /// Adds two amounts, `None` on overflow
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Lifecycle state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Processing" => Ok(OrderStatus::Processing),
            "Completed" => Ok(OrderStatus::Completed),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(Error::SchemaMismatch(format!(
                "Unknown order status: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Customer {
    /// First and last name separated by a space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    /// Categories this product belongs to
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
}

/// Quantity of one product held by one store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub store_id: StoreId,
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub order_date: Timestamp,
    pub status: OrderStatus,
}

/// One line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: OrderId,
    /// Line number within the order
    pub item_id: u32,
    pub product_id: ProductId,
    /// Price per unit at the time of sale
    pub unit_price: Money,
    pub quantity: u32,
    pub discount: Money,
}

impl OrderItem {
    /// Line value before discount
    pub fn subtotal(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// Raw rows for every entity kind, as supplied by a data source.
///
/// Each sequence is finite and ordered; that order is preserved by the store
/// and drives the iteration order of every report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub stores: Vec<Store>,
    pub stocks: Vec<Stock>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
}

impl Dataset {
    /// Total number of rows across all entity kinds
    pub fn row_count(&self) -> usize {
        self.customers.len()
            + self.products.len()
            + self.categories.len()
            + self.stores.len()
            + self.stocks.len()
            + self.orders.len()
            + self.order_items.len()
    }
}
