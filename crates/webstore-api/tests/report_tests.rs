//! Report integration tests over a small hand-checked shop

mod common;

use common::{customer, item, order, shop, stock, store, NOW};
use webstore::reports::*;
use webstore::{
    Catalog, Dataset, DiscountListing, Money, OrderStatus, ReportConfig, ReportKind, Result,
};

fn catalog() -> Catalog {
    Catalog::load(shop()).unwrap()
}

#[test]
fn test_all_customers_in_load_order() {
    let rows = all_customers(&catalog());
    let names: Vec<_> = rows.iter().map(|r| r.full_name.as_str()).collect();
    assert_eq!(names, vec!["Ann Archer", "Ben Baker", "Cid Cooper", "Dee Dyer"]);
    assert_eq!(rows[1].email, "ben@example.com");
}

#[test]
fn test_orders_with_item_count() -> Result<()> {
    let rows = orders_with_item_count(&catalog())?;
    let counts: Vec<_> = rows.iter().map(|r| (r.order_id, r.item_count)).collect();
    assert_eq!(counts, vec![(10, 3), (11, 1), (12, 4), (13, 3), (14, 1)]);
    assert_eq!(rows[0].customer_name, "Ann Archer");
    assert_eq!(rows[0].status, OrderStatus::Pending);
    Ok(())
}

#[test]
fn test_products_by_price_is_sorted_permutation() {
    let catalog = catalog();
    let rows = products_by_price(&catalog);

    assert_eq!(rows.len(), catalog.store().products().len());
    assert!(rows.windows(2).all(|w| w[0].price >= w[1].price));

    let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Laptop", "Phone", "Novel", "Cable"]);
}

#[test]
fn test_products_by_price_keeps_load_order_on_ties() {
    let mut dataset = shop();
    dataset.products[3].price = Money::from_cents(80_000);

    let rows = products_by_price(&Catalog::load(dataset).unwrap());
    let ids: Vec<_> = rows.iter().map(|r| r.product_id).collect();
    assert_eq!(ids, vec![1, 2, 4, 3]);
}

#[test]
fn test_pending_order_total_is_discounted() -> Result<()> {
    let rows = pending_orders(&catalog())?;
    assert_eq!(rows.len(), 1);

    // 1200.00 - 100.00 + 2 * 15.00
    assert_eq!(rows[0].order_id, 10);
    assert_eq!(rows[0].total, Money::from_cents(113_000));
    assert_eq!(rows[0].total.to_string(), "1130.00");
    Ok(())
}

#[test]
fn test_order_count_per_customer() {
    let rows = order_count_per_customer(&catalog());
    let counts: Vec<_> = rows
        .iter()
        .map(|r| (r.customer_name.as_str(), r.order_count))
        .collect();

    // Dee has no orders and is left out
    assert_eq!(
        counts,
        vec![("Ann Archer", 3), ("Ben Baker", 1), ("Cid Cooper", 1)]
    );
}

#[test]
fn test_top_customers_by_value() {
    let rows = top_customers_by_value(&catalog(), 3);
    let totals: Vec<_> = rows.iter().map(|r| (r.customer_id, r.total.cents())).collect();
    assert_eq!(totals, vec![(3, 156_500), (1, 120_500), (2, 80_000)]);

    let everyone = top_customers_by_value(&catalog(), 10);
    assert_eq!(everyone.len(), 4);
    assert_eq!(everyone[3].total, Money::ZERO);
}

#[test]
fn test_top_three_of_four_totals() {
    // one single-line order per customer with totals 100, 50, 200, 75
    let dataset = Dataset {
        customers: (1..=4).map(|id| customer(id, "C", &id.to_string())).collect(),
        products: vec![common::product(1, "Thing", 1, &[])],
        orders: (1..=4).map(|id| order(id, id, NOW, OrderStatus::Completed)).collect(),
        order_items: [100, 50, 200, 75]
            .into_iter()
            .zip(1..)
            .map(|(total, id)| item(id, 1, 1, total, 1, 0))
            .collect(),
        ..Dataset::default()
    };

    let rows = top_customers_by_value(&Catalog::load(dataset).unwrap(), 3);
    let totals: Vec<_> = rows.iter().map(|r| r.total.cents()).collect();
    assert_eq!(totals, vec![200, 100, 75]);
}

#[test]
fn test_top_customers_ties_keep_load_order() {
    // Ann spends 80.00; Ben, Cid and Dee each spend 50.00 and Cid ordered first
    let dataset = Dataset {
        customers: vec![
            customer(1, "Ann", "Archer"),
            customer(2, "Ben", "Baker"),
            customer(3, "Cid", "Cooper"),
            customer(4, "Dee", "Dyer"),
        ],
        products: vec![common::product(1, "Thing", 1_000, &[])],
        orders: vec![
            order(1, 3, NOW, OrderStatus::Completed),
            order(2, 1, NOW, OrderStatus::Completed),
            order(3, 2, NOW, OrderStatus::Completed),
            order(4, 4, NOW, OrderStatus::Completed),
        ],
        order_items: vec![
            item(1, 1, 1, 5_000, 1, 0),
            item(2, 1, 1, 8_000, 1, 0),
            item(3, 1, 1, 2_500, 2, 0),
            item(4, 1, 1, 6_000, 1, 1_000),
        ],
        ..Dataset::default()
    };

    let rows = top_customers_by_value(&Catalog::load(dataset).unwrap(), 3);
    let ranked: Vec<_> = rows.iter().map(|r| (r.customer_id, r.total.cents())).collect();
    // equal totals follow customer load order, not order placement
    assert_eq!(ranked, vec![(1, 8_000), (2, 5_000), (3, 5_000)]);
}

#[test]
fn test_recent_orders_window() -> Result<()> {
    let rows = recent_orders(&catalog(), NOW, 30)?;
    let ids: Vec<_> = rows.iter().map(|r| r.order_id).collect();
    assert_eq!(ids, vec![10, 11, 13, 14]);
    Ok(())
}

#[test]
fn test_recent_orders_boundary() -> Result<()> {
    let day = 86_400;
    let dataset = Dataset {
        customers: vec![customer(1, "Ann", "Archer")],
        orders: vec![
            order(1, 1, NOW - 30 * day, OrderStatus::Completed),
            order(2, 1, NOW - 31 * day, OrderStatus::Completed),
            order(3, 1, NOW - 30 * day + 1, OrderStatus::Completed),
        ],
        ..Dataset::default()
    };

    let rows = recent_orders(&Catalog::load(dataset).unwrap(), NOW, 30)?;
    let ids: Vec<_> = rows.iter().map(|r| r.order_id).collect();
    assert_eq!(ids, vec![1, 3]);
    Ok(())
}

#[test]
fn test_total_sold_per_product() -> Result<()> {
    let rows = total_sold_per_product(&catalog())?;
    let totals: Vec<_> = rows
        .iter()
        .map(|r| (r.product_name.as_str(), r.total_sold))
        .collect();

    // Cable never sold
    assert_eq!(totals, vec![("Novel", 8), ("Phone", 3), ("Laptop", 1)]);
    Ok(())
}

#[test]
fn test_discounted_orders_lists_discounted_lines() -> Result<()> {
    let rows = discounted_orders(&catalog(), DiscountListing::DiscountedOnly)?;
    let ids: Vec<_> = rows.iter().map(|r| r.order_id).collect();
    assert_eq!(ids, vec![10, 13]);

    assert_eq!(rows[0].lines.len(), 1);
    assert_eq!(rows[0].lines[0].product_name, "Laptop");
    assert_eq!(rows[0].lines[0].discount, Money::from_cents(10_000));
    assert_eq!(rows[1].lines[0].product_name, "Phone");
    Ok(())
}

#[test]
fn test_discounted_orders_can_list_every_line() -> Result<()> {
    let rows = discounted_orders(&catalog(), DiscountListing::AllItems)?;
    assert_eq!(rows.len(), 2);

    let lines: Vec<_> = rows[0]
        .lines
        .iter()
        .map(|l| (l.product_name.as_str(), l.discount.cents()))
        .collect();
    assert_eq!(lines, vec![("Laptop", 10_000), ("Novel", 0)]);
    Ok(())
}

#[test]
fn test_category_stock_leaders() -> Result<()> {
    let rows = category_stock_leaders(&catalog(), "Electronics")?;
    assert_eq!(rows.len(), 2);

    // stocks (North, 5) and (South, 12)
    assert_eq!(rows[0].product_name, "Laptop");
    let leader = rows[0].max_stock.as_ref().unwrap();
    assert_eq!((leader.store_name.as_str(), leader.quantity), ("South", 12));

    // sold but stocked nowhere
    assert_eq!(rows[1].product_name, "Phone");
    assert!(rows[1].max_stock.is_none());
    Ok(())
}

#[test]
fn test_category_stock_leaders_first_store_wins_ties() -> Result<()> {
    let mut dataset = shop();
    dataset.stores.push(store(3, "East"));
    dataset.stocks.push(stock(3, 1, 12));

    let rows = category_stock_leaders(&Catalog::load(dataset).unwrap(), "Electronics")?;
    let leader = rows[0].max_stock.as_ref().unwrap();
    assert_eq!(leader.store_id, 2);
    Ok(())
}

#[test]
fn test_unknown_category_is_empty() -> Result<()> {
    assert!(category_stock_leaders(&catalog(), "Garden")?.is_empty());
    // names match exactly
    assert!(category_stock_leaders(&catalog(), "electronics")?.is_empty());
    Ok(())
}

#[test]
fn test_reports_are_idempotent() -> Result<()> {
    let catalog = catalog();

    for listing in [DiscountListing::DiscountedOnly, DiscountListing::AllItems] {
        let config = ReportConfig::default()
            .with_now(NOW)
            .with_discount_listing(listing);

        for kind in ReportKind::ALL {
            let first = kind.run(&catalog, &config)?;
            let second = kind.run(&catalog, &config)?;
            assert_eq!(first, second, "{} changed between runs", kind);
            assert!(!first.is_empty(), "{} is empty on the shop", kind);
        }
    }
    Ok(())
}

#[test]
fn test_empty_catalog_yields_empty_reports() -> Result<()> {
    let catalog = Catalog::load(Dataset::default())?;

    assert!(all_customers(&catalog).is_empty());
    assert!(orders_with_item_count(&catalog)?.is_empty());
    assert!(top_customers_by_value(&catalog, 3).is_empty());
    assert!(recent_orders(&catalog, NOW, 30)?.is_empty());
    assert!(discounted_orders(&catalog, DiscountListing::AllItems)?.is_empty());
    Ok(())
}
