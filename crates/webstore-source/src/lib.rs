//! # WebStore Sources
//!
//! Dataset sources for WebStore.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! **This crate is an internal implementation detail of WebStore.**
//!
//! Users should depend on the main `webstore` crate instead, which provides
//! the stable public API.
//!
//! ---
//!
//! A [`DataSource`] supplies the raw rows for every entity kind in one call.
//! Two sources are provided:
//!
//! - [`MemorySource`]: wraps a [`Dataset`] built in code (seed data, tests)
//! - [`FileSource`]: reads a checksummed dataset file written by
//!   [`write_dataset`]
//!
//! ## Usage
//!
//! ```ignore
//! use webstore_source::{DataSource, FileSource};
//!
//! let dataset = FileSource::new("/path/to/webstore.wsds").load_all()?;
//! println!("loaded {} rows", dataset.row_count());
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use webstore_core::{Dataset, Error, Result};

pub mod format;

pub use format::{decode_dataset, encode_dataset, DATASET_FORMAT_VERSION, DATASET_MAGIC};

/// Supplier of raw rows for every entity kind
pub trait DataSource {
    /// Loads all rows.
    ///
    /// # Errors
    ///
    /// Returns `Error::SourceUnavailable` if the source cannot be reached and
    /// `Error::SchemaMismatch` if its content has an unexpected shape.
    fn load_all(&self) -> Result<Dataset>;

    /// Human-readable description for diagnostics
    fn describe(&self) -> String;
}

impl<S: DataSource + ?Sized> DataSource for &S {
    fn load_all(&self) -> Result<Dataset> {
        (**self).load_all()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn load_all(&self) -> Result<Dataset> {
        (**self).load_all()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// In-memory source returning a copy of its dataset on every load
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    dataset: Dataset,
}

impl MemorySource {
    /// Create a source over a dataset
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// The wrapped dataset
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl DataSource for MemorySource {
    fn load_all(&self) -> Result<Dataset> {
        Ok(self.dataset.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} rows)", self.dataset.row_count())
    }
}

/// Source backed by a dataset file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source reading from `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the dataset file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    fn load_all(&self) -> Result<Dataset> {
        let data = fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::SourceUnavailable(format!(
                "dataset file not found: {:?}",
                self.path
            )),
            _ => Error::SourceUnavailable(format!(
                "failed to read dataset file {:?}: {}",
                self.path, e
            )),
        })?;

        let dataset = decode_dataset(&data)?;
        debug!(path = ?self.path, rows = dataset.row_count(), "dataset file loaded");
        Ok(dataset)
    }

    fn describe(&self) -> String {
        format!("file {:?}", self.path)
    }
}

/// Write a dataset file that [`FileSource`] can read.
///
/// Creates parent directories as needed and syncs the file before returning.
pub fn write_dataset(path: impl AsRef<Path>, dataset: &Dataset) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let encoded = encode_dataset(dataset)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&encoded)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    debug!(path = ?path, bytes = encoded.len(), "dataset file written");
    Ok(())
}
