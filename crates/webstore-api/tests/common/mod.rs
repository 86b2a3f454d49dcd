//! Shared fixture builders for the integration tests

#![allow(dead_code)]

use webstore::{
    Category, Customer, Dataset, Money, Order, OrderItem, OrderStatus, Product, Stock, Store,
    Timestamp,
};

/// Fixed reference time so window tests do not depend on the clock
pub const NOW: Timestamp = 1_700_000_000;

pub fn customer(id: u64, first: &str, last: &str) -> Customer {
    Customer {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
    }
}

pub fn product(id: u64, name: &str, cents: i64, category_ids: &[u64]) -> Product {
    Product {
        id,
        name: name.to_string(),
        price: Money::from_cents(cents),
        category_ids: category_ids.to_vec(),
    }
}

pub fn category(id: u64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
    }
}

pub fn store(id: u64, name: &str) -> Store {
    Store {
        id,
        name: name.to_string(),
    }
}

pub fn stock(store_id: u64, product_id: u64, quantity: u32) -> Stock {
    Stock {
        store_id,
        product_id,
        quantity,
    }
}

pub fn order(id: u64, customer_id: u64, order_date: Timestamp, status: OrderStatus) -> Order {
    Order {
        id,
        customer_id,
        order_date,
        status,
    }
}

pub fn item(
    order_id: u64,
    item_id: u32,
    product_id: u64,
    unit_cents: i64,
    quantity: u32,
    discount_cents: i64,
) -> OrderItem {
    OrderItem {
        order_id,
        item_id,
        product_id,
        unit_price: Money::from_cents(unit_cents),
        quantity,
        discount: Money::from_cents(discount_cents),
    }
}

/// Small shop used across the report tests.
///
/// - customers 1..=4; customer 4 has no orders, customer 1 has three
/// - product 1 (Laptop) and 2 (Phone) are Electronics, 3 (Novel) is Books,
///   4 (Cable) is Electronics but never sold
/// - order 10 is pending with two lines, one discounted
pub fn shop() -> Dataset {
    Dataset {
        customers: vec![
            customer(1, "Ann", "Archer"),
            customer(2, "Ben", "Baker"),
            customer(3, "Cid", "Cooper"),
            customer(4, "Dee", "Dyer"),
        ],
        products: vec![
            product(1, "Laptop", 120_000, &[1]),
            product(2, "Phone", 80_000, &[1]),
            product(3, "Novel", 1_500, &[2]),
            product(4, "Cable", 999, &[1]),
        ],
        categories: vec![category(1, "Electronics"), category(2, "Books")],
        stores: vec![store(1, "North"), store(2, "South")],
        stocks: vec![
            stock(1, 1, 5),
            stock(2, 1, 12),
            stock(1, 3, 40),
            stock(2, 4, 100),
        ],
        orders: vec![
            order(10, 1, NOW - 3_600, OrderStatus::Pending),
            order(11, 2, NOW - 86_400, OrderStatus::Completed),
            order(12, 1, NOW - 40 * 86_400, OrderStatus::Completed),
            order(13, 3, NOW - 2 * 86_400, OrderStatus::Processing),
            order(14, 1, NOW - 10 * 86_400, OrderStatus::Cancelled),
        ],
        order_items: vec![
            item(10, 1, 1, 120_000, 1, 10_000),
            item(10, 2, 3, 1_500, 2, 0),
            item(11, 1, 2, 80_000, 1, 0),
            item(12, 1, 3, 1_500, 4, 0),
            item(13, 1, 2, 80_000, 2, 5_000),
            item(13, 2, 3, 1_500, 1, 0),
            item(14, 1, 3, 1_500, 1, 0),
        ],
    }
}
