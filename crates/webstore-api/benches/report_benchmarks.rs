//! Benchmarks for catalog loading and the report builders.
//!
//! Run with: `cargo bench --package webstore`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use webstore::reports::*;
use webstore::{
    Catalog, Category, Customer, Dataset, DiscountListing, Money, Order, OrderItem, OrderStatus,
    Product, Stock, Store, SECONDS_PER_DAY,
};

const NOW: u64 = 1_700_000_000;

// =============================================================================
// Helper Functions
// =============================================================================

/// Builds a shop with `customers` customers, four orders each and three
/// lines per order over a fixed product range.
fn generate_shop(customers: u64) -> Dataset {
    const PRODUCTS: u64 = 200;
    const STORES: u64 = 8;

    let mut dataset = Dataset {
        categories: vec![
            Category {
                id: 1,
                name: "Electronics".to_string(),
            },
            Category {
                id: 2,
                name: "Books".to_string(),
            },
        ],
        ..Dataset::default()
    };

    dataset.stores = (1..=STORES)
        .map(|id| Store {
            id,
            name: format!("Store {}", id),
        })
        .collect();

    for id in 1..=PRODUCTS {
        dataset.products.push(Product {
            id,
            name: format!("Product {}", id),
            price: Money::from_cents((id as i64 * 7_919) % 50_000 + 100),
            category_ids: vec![id % 2 + 1],
        });
        for store_id in 1..=STORES {
            dataset.stocks.push(Stock {
                store_id,
                product_id: id,
                quantity: ((id * 31 + store_id * 17) % 100) as u32,
            });
        }
    }

    let mut order_id = 0;
    for id in 1..=customers {
        dataset.customers.push(Customer {
            id,
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            email: format!("customer{}@example.com", id),
        });

        for n in 0..4u64 {
            order_id += 1;
            dataset.orders.push(Order {
                id: order_id,
                customer_id: id,
                order_date: NOW - ((order_id * 13) % 90) * SECONDS_PER_DAY,
                status: match order_id % 4 {
                    0 => OrderStatus::Pending,
                    1 => OrderStatus::Processing,
                    2 => OrderStatus::Completed,
                    _ => OrderStatus::Cancelled,
                },
            });

            for line in 0..3u32 {
                let product_id = (order_id * 3 + u64::from(line) + n) % PRODUCTS + 1;
                let unit_price = Money::from_cents((product_id as i64 * 7_919) % 50_000 + 100);
                dataset.order_items.push(OrderItem {
                    order_id,
                    item_id: line + 1,
                    product_id,
                    unit_price,
                    quantity: line + 1,
                    discount: if order_id % 5 == 0 {
                        Money::from_cents(50)
                    } else {
                        Money::ZERO
                    },
                });
            }
        }
    }

    dataset
}

// =============================================================================
// Catalog Benchmarks
// =============================================================================

fn bench_catalog_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_load");

    for customers in [100u64, 1_000, 10_000] {
        let dataset = generate_shop(customers);
        group.throughput(Throughput::Elements(dataset.row_count() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(customers),
            &dataset,
            |b, dataset| b.iter(|| Catalog::load(black_box(dataset.clone())).unwrap()),
        );
    }

    group.finish();
}

// =============================================================================
// Report Benchmarks
// =============================================================================

fn bench_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("reports");

    for customers in [100u64, 1_000, 10_000] {
        let catalog = Catalog::load(generate_shop(customers)).unwrap();

        group.bench_with_input(
            BenchmarkId::new("orders_with_item_count", customers),
            &catalog,
            |b, catalog| b.iter(|| orders_with_item_count(black_box(catalog)).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("pending_orders", customers),
            &catalog,
            |b, catalog| b.iter(|| pending_orders(black_box(catalog)).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("order_count_per_customer", customers),
            &catalog,
            |b, catalog| b.iter(|| order_count_per_customer(black_box(catalog))),
        );
        group.bench_with_input(
            BenchmarkId::new("top_customers_by_value", customers),
            &catalog,
            |b, catalog| b.iter(|| top_customers_by_value(black_box(catalog), 3)),
        );
        group.bench_with_input(
            BenchmarkId::new("total_sold_per_product", customers),
            &catalog,
            |b, catalog| b.iter(|| total_sold_per_product(black_box(catalog)).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("discounted_orders", customers),
            &catalog,
            |b, catalog| {
                b.iter(|| discounted_orders(black_box(catalog), DiscountListing::AllItems).unwrap())
            },
        );
        group.bench_with_input(
            BenchmarkId::new("category_stock_leaders", customers),
            &catalog,
            |b, catalog| {
                b.iter(|| category_stock_leaders(black_box(catalog), "Electronics").unwrap())
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_catalog_load, bench_reports);
criterion_main!(benches);
