//! # WebStore
//!
//! Composable relational reports over an immutable, in-memory web store
//! dataset: customers, products, categories, stores, stock, orders and order
//! lines.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use webstore::{FileSource, ReportKind, WebStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Validate the dataset and build the relationship index
//!     let store = WebStore::open(&FileSource::new("./data/webstore.wsds"))?;
//!
//!     // Run every report against the current snapshot
//!     for kind in ReportKind::ALL {
//!         print!("{}", store.run(kind)?);
//!     }
//!
//!     // Pick up a new dataset; snapshots already handed out are unaffected
//!     store.reload(&FileSource::new("./data/webstore.wsds"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Building reports directly
//!
//! Every report is a pure function of a [`Catalog`], so a snapshot can be
//! queried with the builders in [`reports`] or with the operators in
//! [`query`]:
//!
//! ```rust
//! use webstore::{query::Query, seed, WebStore};
//!
//! let store = WebStore::from_dataset(seed::sample_dataset(1_700_000_000))?;
//! let snapshot = store.snapshot()?;
//!
//! let cheap = Query::new(snapshot.catalog().store().products())
//!     .filter(|p| p.price.cents() < 5_000)
//!     .count();
//! assert!(cheap > 0);
//! # Ok::<(), webstore::Error>(())
//! ```

#![warn(clippy::all)]

use std::sync::{Arc, RwLock};
use tracing::{debug, info};

pub mod config;
pub mod logging;
pub mod output;
pub mod reports;
pub mod seed;

// Re-export core types
pub use webstore_core::{
    query, Catalog, Category, Customer, CustomerId, Dataset, EntityStore, Error, Money, Order,
    OrderId, OrderItem, OrderStatus, Product, ProductId, RelationshipIndex, Result, Stock, Store,
    StoreId, Timestamp, SECONDS_PER_DAY,
};

// Sources
pub use webstore_source::{write_dataset, DataSource, FileSource, MemorySource};

pub use config::{DiscountListing, ReportConfig};
pub use output::{ReportKind, ReportOutput};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A loaded catalog and the reload generation that produced it
#[derive(Debug)]
pub struct Snapshot {
    version: u64,
    catalog: Catalog,
}

impl Snapshot {
    /// Reload generation, starting at 1 for the initial load
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

struct WebStoreInner {
    current: RwLock<Arc<Snapshot>>,
    config: ReportConfig,
}

/// The main WebStore handle.
///
/// Holds the current [`Snapshot`] and the report configuration. Cheap to
/// clone and safe to share across threads; every clone sees the same
/// snapshot.
///
/// A report runs against one snapshot from start to finish. [`reload`]
/// builds the replacement catalog completely before swapping it in, so a
/// reader observes either the old data or the new data, never a mix.
///
/// [`reload`]: WebStore::reload
#[derive(Clone)]
pub struct WebStore {
    inner: Arc<WebStoreInner>,
}

impl WebStore {
    /// Loads a catalog from a source with the default report configuration.
    ///
    /// # Errors
    ///
    /// Returns the source's error if it cannot be read, or `Error::Load` if
    /// the rows violate referential integrity.
    pub fn open<S: DataSource + ?Sized>(source: &S) -> Result<Self> {
        Self::with_config(source, ReportConfig::default())
    }

    /// Loads a catalog from a source with a custom report configuration.
    pub fn with_config<S: DataSource + ?Sized>(source: &S, config: ReportConfig) -> Result<Self> {
        config.validate()?;
        let catalog = build_catalog(source)?;
        info!(source = %source.describe(), "webstore opened");

        Ok(WebStore {
            inner: Arc::new(WebStoreInner {
                current: RwLock::new(Arc::new(Snapshot {
                    version: 1,
                    catalog,
                })),
                config,
            }),
        })
    }

    /// Loads a catalog from rows built in code
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        Self::open(&MemorySource::new(dataset))
    }

    /// The current snapshot. It stays valid and unchanged across reloads.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        let current = self.inner.current.read().map_err(|_| Error::LockPoisoned)?;
        Ok(Arc::clone(&current))
    }

    /// Replaces the catalog with one loaded from `source`.
    ///
    /// The new catalog is built without holding the lock; on any error the
    /// current snapshot stays in place. Returns the new version.
    pub fn reload<S: DataSource + ?Sized>(&self, source: &S) -> Result<u64> {
        let catalog = build_catalog(source)?;

        let mut current = self.inner.current.write().map_err(|_| Error::LockPoisoned)?;
        let version = current.version + 1;
        *current = Arc::new(Snapshot { version, catalog });
        drop(current);

        info!(source = %source.describe(), version, "webstore reloaded");
        Ok(version)
    }

    /// Version of the current snapshot
    pub fn version(&self) -> Result<u64> {
        Ok(self.snapshot()?.version())
    }

    pub fn config(&self) -> &ReportConfig {
        &self.inner.config
    }

    /// Runs one report against the current snapshot
    pub fn run(&self, kind: ReportKind) -> Result<ReportOutput> {
        let snapshot = self.snapshot()?;
        let output = kind.run(snapshot.catalog(), &self.inner.config)?;
        debug!(report = %kind, version = snapshot.version(), rows = output.len(), "report built");
        Ok(output)
    }

    /// Runs every report against a single snapshot
    pub fn run_all(&self) -> Result<Vec<ReportOutput>> {
        let snapshot = self.snapshot()?;
        ReportKind::ALL
            .iter()
            .map(|kind| kind.run(snapshot.catalog(), &self.inner.config))
            .collect()
    }
}

impl std::fmt::Debug for WebStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebStore")
            .field("version", &self.version().ok())
            .field("config", &self.inner.config)
            .finish()
    }
}

fn build_catalog<S: DataSource + ?Sized>(source: &S) -> Result<Catalog> {
    let dataset = source.load_all()?;
    debug!(source = %source.describe(), rows = dataset.row_count(), "dataset loaded");
    Catalog::load(dataset)
}
