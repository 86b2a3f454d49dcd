//! Report configuration

use std::time::{SystemTime, UNIX_EPOCH};
use webstore_core::{Error, Result, Timestamp};

/// Default trailing window for the recent-orders report
pub const DEFAULT_RECENT_WINDOW_DAYS: u64 = 30;

/// Default number of customers in the top-customers report
pub const DEFAULT_TOP_CUSTOMERS: usize = 3;

/// Default category for the stock-leaders report
pub const DEFAULT_CATEGORY: &str = "Electronics";

/// Which lines the discounted-orders report lists for each order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscountListing {
    /// Only lines whose discount is above zero
    #[default]
    DiscountedOnly,
    /// Every line of a qualifying order
    AllItems,
}

/// Parameters shared by the report builders
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Reference time for the recent-orders report; `None` reads the system clock
    pub now: Option<Timestamp>,
    /// Trailing window, in days, for the recent-orders report
    pub recent_window_days: u64,
    /// How many customers the top-customers report keeps
    pub top_customers: usize,
    /// Category name matched by the stock-leaders report
    pub category: String,
    /// Line selection for the discounted-orders report
    pub discount_listing: DiscountListing,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            now: None,
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
            top_customers: DEFAULT_TOP_CUSTOMERS,
            category: DEFAULT_CATEGORY.to_string(),
            discount_listing: DiscountListing::default(),
        }
    }
}

impl ReportConfig {
    /// Pin the reference time
    pub fn with_now(mut self, now: Timestamp) -> Self {
        self.now = Some(now);
        self
    }

    /// Set the recent-orders window
    pub fn with_recent_window_days(mut self, days: u64) -> Self {
        self.recent_window_days = days;
        self
    }

    /// Set the top-customers count
    pub fn with_top_customers(mut self, n: usize) -> Self {
        self.top_customers = n;
        self
    }

    /// Set the stock-leaders category
    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = category.into();
        self
    }

    /// Set the discounted-orders line selection
    pub fn with_discount_listing(mut self, listing: DiscountListing) -> Self {
        self.discount_listing = listing;
        self
    }

    /// Reference time: the pinned value or the current system time
    pub fn now(&self) -> Timestamp {
        self.now.unwrap_or_else(unix_now)
    }

    /// Check the configuration for values no report can use
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "category name cannot be empty".to_string(),
            ));
        }

        if self.recent_window_days.checked_mul(webstore_core::SECONDS_PER_DAY).is_none() {
            return Err(Error::InvalidConfig(format!(
                "recent window of {} days is out of range",
                self.recent_window_days
            )));
        }

        Ok(())
    }
}

/// Current Unix time in seconds
pub fn unix_now() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
