//! Report selection and rendering

use crate::config::ReportConfig;
use crate::reports::{self, *};
use std::fmt;
use webstore_core::{Catalog, Result};

/// One of the ten reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    AllCustomers,
    OrdersWithItemCount,
    ProductsByPrice,
    PendingOrders,
    OrderCountPerCustomer,
    TopCustomersByValue,
    RecentOrders,
    TotalSoldPerProduct,
    DiscountedOrders,
    CategoryStockLeaders,
}

impl ReportKind {
    /// Every report, in presentation order
    pub const ALL: [ReportKind; 10] = [
        ReportKind::AllCustomers,
        ReportKind::OrdersWithItemCount,
        ReportKind::ProductsByPrice,
        ReportKind::PendingOrders,
        ReportKind::OrderCountPerCustomer,
        ReportKind::TopCustomersByValue,
        ReportKind::RecentOrders,
        ReportKind::TotalSoldPerProduct,
        ReportKind::DiscountedOrders,
        ReportKind::CategoryStockLeaders,
    ];

    /// Heading printed above the rows
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::AllCustomers => "All customers",
            ReportKind::OrdersWithItemCount => "Orders with item count",
            ReportKind::ProductsByPrice => "Products by price",
            ReportKind::PendingOrders => "Pending orders with total",
            ReportKind::OrderCountPerCustomer => "Orders per customer",
            ReportKind::TopCustomersByValue => "Top customers by order value",
            ReportKind::RecentOrders => "Recent orders",
            ReportKind::TotalSoldPerProduct => "Units sold per product",
            ReportKind::DiscountedOrders => "Orders with discounts",
            ReportKind::CategoryStockLeaders => "Category stock leaders",
        }
    }

    /// Build this report over a catalog.
    pub fn run(&self, catalog: &Catalog, config: &ReportConfig) -> Result<ReportOutput> {
        let output = match self {
            ReportKind::AllCustomers => ReportOutput::Customers(all_customers(catalog)),
            ReportKind::OrdersWithItemCount => {
                ReportOutput::OrderItemCounts(orders_with_item_count(catalog)?)
            }
            ReportKind::ProductsByPrice => ReportOutput::ProductPrices(products_by_price(catalog)),
            ReportKind::PendingOrders => ReportOutput::PendingOrders(pending_orders(catalog)?),
            ReportKind::OrderCountPerCustomer => {
                ReportOutput::OrderCounts(order_count_per_customer(catalog))
            }
            ReportKind::TopCustomersByValue => ReportOutput::CustomerValues(
                top_customers_by_value(catalog, config.top_customers),
            ),
            ReportKind::RecentOrders => ReportOutput::RecentOrders(reports::recent_orders(
                catalog,
                config.now(),
                config.recent_window_days,
            )?),
            ReportKind::TotalSoldPerProduct => {
                ReportOutput::ProductSales(total_sold_per_product(catalog)?)
            }
            ReportKind::DiscountedOrders => ReportOutput::DiscountedOrders(discounted_orders(
                catalog,
                config.discount_listing,
            )?),
            ReportKind::CategoryStockLeaders => ReportOutput::StockLeaders(
                category_stock_leaders(catalog, &config.category)?,
            ),
        };
        Ok(output)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Rows produced by one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutput {
    Customers(Vec<CustomerRow>),
    OrderItemCounts(Vec<OrderItemCountRow>),
    ProductPrices(Vec<ProductPriceRow>),
    PendingOrders(Vec<PendingOrderRow>),
    OrderCounts(Vec<CustomerOrderCountRow>),
    CustomerValues(Vec<CustomerValueRow>),
    RecentOrders(Vec<RecentOrderRow>),
    ProductSales(Vec<ProductSalesRow>),
    DiscountedOrders(Vec<DiscountedOrderRow>),
    StockLeaders(Vec<StockLeaderRow>),
}

impl ReportOutput {
    /// The report these rows belong to
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportOutput::Customers(_) => ReportKind::AllCustomers,
            ReportOutput::OrderItemCounts(_) => ReportKind::OrdersWithItemCount,
            ReportOutput::ProductPrices(_) => ReportKind::ProductsByPrice,
            ReportOutput::PendingOrders(_) => ReportKind::PendingOrders,
            ReportOutput::OrderCounts(_) => ReportKind::OrderCountPerCustomer,
            ReportOutput::CustomerValues(_) => ReportKind::TopCustomersByValue,
            ReportOutput::RecentOrders(_) => ReportKind::RecentOrders,
            ReportOutput::ProductSales(_) => ReportKind::TotalSoldPerProduct,
            ReportOutput::DiscountedOrders(_) => ReportKind::DiscountedOrders,
            ReportOutput::StockLeaders(_) => ReportKind::CategoryStockLeaders,
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            ReportOutput::Customers(rows) => rows.len(),
            ReportOutput::OrderItemCounts(rows) => rows.len(),
            ReportOutput::ProductPrices(rows) => rows.len(),
            ReportOutput::PendingOrders(rows) => rows.len(),
            ReportOutput::OrderCounts(rows) => rows.len(),
            ReportOutput::CustomerValues(rows) => rows.len(),
            ReportOutput::RecentOrders(rows) => rows.len(),
            ReportOutput::ProductSales(rows) => rows.len(),
            ReportOutput::DiscountedOrders(rows) => rows.len(),
            ReportOutput::StockLeaders(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn write_rows<T: fmt::Display>(f: &mut fmt::Formatter<'_>, rows: &[T]) -> fmt::Result {
    if rows.is_empty() {
        return writeln!(f, "  (none)");
    }
    for row in rows {
        writeln!(f, "  {}", row)?;
    }
    Ok(())
}

impl fmt::Display for ReportOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.kind().title())?;
        match self {
            ReportOutput::Customers(rows) => write_rows(f, rows),
            ReportOutput::OrderItemCounts(rows) => write_rows(f, rows),
            ReportOutput::ProductPrices(rows) => write_rows(f, rows),
            ReportOutput::PendingOrders(rows) => write_rows(f, rows),
            ReportOutput::OrderCounts(rows) => write_rows(f, rows),
            ReportOutput::CustomerValues(rows) => write_rows(f, rows),
            ReportOutput::RecentOrders(rows) => write_rows(f, rows),
            ReportOutput::ProductSales(rows) => write_rows(f, rows),
            ReportOutput::DiscountedOrders(rows) => write_rows(f, rows),
            ReportOutput::StockLeaders(rows) => write_rows(f, rows),
        }
    }
}
