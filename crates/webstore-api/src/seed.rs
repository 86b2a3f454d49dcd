//! Sample dataset for demos and benchmarks.
//!
//! A small shop: three stores, a handful of products across three categories,
//! and orders spread over the last few months relative to `now`. One customer
//! has never ordered, one product has never sold, and one sold product has no
//! stock rows at all.

use webstore_core::{
    Category, Customer, Dataset, Money, Order, OrderItem, OrderStatus, Product, Stock, Store,
    Timestamp, SECONDS_PER_DAY,
};

/// Builds the sample dataset with order dates counted back from `now`.
pub fn sample_dataset(now: Timestamp) -> Dataset {
    let days_ago = |days: u64| now.saturating_sub(days * SECONDS_PER_DAY);

    let customer = |id, first: &str, last: &str| Customer {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.com", first, last).to_lowercase(),
    };
    let product = |id, name: &str, price: Money, category_ids: &[u64]| Product {
        id,
        name: name.to_string(),
        price,
        category_ids: category_ids.to_vec(),
    };
    let order = |id, customer_id, days: u64, status| Order {
        id,
        customer_id,
        order_date: days_ago(days),
        status,
    };
    let item = |order_id, item_id, product_id, unit_price: Money, quantity, discount: Money| {
        OrderItem {
            order_id,
            item_id,
            product_id,
            unit_price,
            quantity,
            discount,
        }
    };
    let stock = |store_id, product_id, quantity| Stock {
        store_id,
        product_id,
        quantity,
    };

    Dataset {
        customers: vec![
            customer(1, "Ada", "Lovelace"),
            customer(2, "Alan", "Turing"),
            customer(3, "Grace", "Hopper"),
            customer(4, "Edsger", "Dijkstra"),
            customer(5, "Barbara", "Liskov"),
        ],
        products: vec![
            product(1, "Noise Cancelling Headphones", Money::new(199, 0), &[1]),
            product(2, "Mechanical Keyboard", Money::new(89, 90), &[1]),
            product(3, "USB-C Charger", Money::new(24, 50), &[1, 3]),
            product(4, "The Art of Programming", Money::new(59, 0), &[2]),
            product(5, "Desk Lamp", Money::new(34, 99), &[3]),
            product(6, "E-Reader", Money::new(129, 0), &[1, 2]),
            product(7, "Webcam", Money::new(49, 0), &[1]),
        ],
        categories: vec![
            Category {
                id: 1,
                name: "Electronics".to_string(),
            },
            Category {
                id: 2,
                name: "Books".to_string(),
            },
            Category {
                id: 3,
                name: "Home".to_string(),
            },
        ],
        stores: vec![
            Store {
                id: 1,
                name: "Downtown".to_string(),
            },
            Store {
                id: 2,
                name: "Harbor".to_string(),
            },
            Store {
                id: 3,
                name: "Online Warehouse".to_string(),
            },
        ],
        stocks: vec![
            stock(1, 1, 4),
            stock(2, 1, 9),
            stock(3, 1, 9),
            stock(1, 2, 15),
            stock(3, 2, 40),
            stock(2, 4, 7),
            stock(1, 5, 3),
            stock(3, 5, 12),
            stock(3, 6, 0),
            stock(2, 7, 25),
        ],
        orders: vec![
            order(1, 1, 2, OrderStatus::Pending),
            order(2, 2, 10, OrderStatus::Completed),
            order(3, 1, 45, OrderStatus::Completed),
            order(4, 3, 5, OrderStatus::Processing),
            order(5, 2, 29, OrderStatus::Pending),
            order(6, 4, 90, OrderStatus::Cancelled),
            order(7, 3, 1, OrderStatus::Pending),
        ],
        order_items: vec![
            item(1, 1, 1, Money::new(199, 0), 1, Money::new(20, 0)),
            item(1, 2, 3, Money::new(24, 50), 2, Money::ZERO),
            item(2, 1, 4, Money::new(59, 0), 1, Money::ZERO),
            item(2, 2, 2, Money::new(89, 90), 1, Money::ZERO),
            item(3, 1, 6, Money::new(129, 0), 1, Money::new(10, 0)),
            item(4, 1, 3, Money::new(24, 50), 4, Money::new(4, 90)),
            item(4, 2, 5, Money::new(34, 99), 1, Money::ZERO),
            item(5, 1, 2, Money::new(89, 90), 2, Money::ZERO),
            item(6, 1, 4, Money::new(59, 0), 3, Money::ZERO),
        ],
    }
}
