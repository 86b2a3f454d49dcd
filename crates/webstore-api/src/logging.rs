//! Logging configuration for WebStore
//!
//! Structured logging through `tracing`, written to stdout, a daily rotated
//! file, or both. Load, reload and report events are emitted at `info` and
//! `debug`; rejected rows at `warn`.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use webstore_core::{Error, Result};

const DEFAULT_LEVEL: &str = "info";
const DEFAULT_LOG_FILE: &str = "webstore.log";

/// Log output destination
#[derive(Debug, Clone)]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to a daily rotated file
    File(PathBuf),
    /// Output to both stdout and file
    Both(PathBuf),
}

/// Log format style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable format
    Pretty,
    /// Single-line format (default)
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level filter, in `EnvFilter` syntax (`RUST_LOG` wins when set)
    pub level: String,
    /// Output destination
    pub output: LogOutput,
    /// Format style
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            output: LogOutput::Stdout,
            format: LogFormat::Compact,
        }
    }
}

impl LogConfig {
    /// Info level on stdout
    pub fn info() -> Self {
        Self::default()
    }

    /// Debug level on stdout; shows per-report row counts
    pub fn debug() -> Self {
        Self {
            level: "debug".to_string(),
            ..Default::default()
        }
    }

    /// Warn level on stdout; only rejected rows and failures
    pub fn warn() -> Self {
        Self {
            level: "warn".to_string(),
            ..Default::default()
        }
    }

    /// Set log output to a rotated file
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::File(path.into());
        self
    }

    /// Set log output to both stdout and a rotated file
    pub fn with_both<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::Both(path.into());
        self
    }

    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set log level filter
    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    }

    /// Install this configuration as the global subscriber.
    ///
    /// File output returns a guard that must stay alive for buffered lines to
    /// be flushed.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if a global subscriber is already set.
    ///
    /// ```rust,no_run
    /// use webstore::logging::LogConfig;
    ///
    /// let _guard = LogConfig::debug().with_both("logs/webstore.log").init()?;
    /// # Ok::<(), webstore::Error>(())
    /// ```
    pub fn init(self) -> Result<Option<WorkerGuard>> {
        let env_filter = self.env_filter();
        let registry = tracing_subscriber::registry().with(env_filter);

        let (installed, guard) = match &self.output {
            LogOutput::Stdout => {
                let installed = match self.format {
                    LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
                    LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
                };
                (installed, None)
            }
            LogOutput::File(path) => {
                let (writer, guard) = file_writer(path);
                let installed = match self.format {
                    LogFormat::Pretty => registry
                        .with(fmt::layer().with_writer(writer).with_ansi(false).pretty())
                        .try_init(),
                    LogFormat::Compact => registry
                        .with(fmt::layer().with_writer(writer).with_ansi(false).compact())
                        .try_init(),
                };
                (installed, Some(guard))
            }
            LogOutput::Both(path) => {
                let (writer, guard) = file_writer(path);
                // format applies to stdout only; the file stays compact
                let installed = match self.format {
                    LogFormat::Pretty => registry
                        .with(fmt::layer().pretty())
                        .with(fmt::layer().with_writer(writer).with_ansi(false).compact())
                        .try_init(),
                    LogFormat::Compact => registry
                        .with(fmt::layer().compact())
                        .with(fmt::layer().with_writer(writer).with_ansi(false).compact())
                        .try_init(),
                };
                (installed, Some(guard))
            }
        };

        installed.map_err(|e| Error::InvalidConfig(format!("logging already initialized: {}", e)))?;
        Ok(guard)
    }
}

fn file_writer(path: &Path) -> (NonBlocking, WorkerGuard) {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_LOG_FILE);

    let file_appender = tracing_appender::rolling::daily(directory, file_name);
    tracing_appender::non_blocking(file_appender)
}
