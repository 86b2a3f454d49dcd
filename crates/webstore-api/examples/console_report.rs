//! Prints every report for the sample shop.
//!
//! Run with: `cargo run --package webstore --example console_report`
//! Set `RUST_LOG=debug` to see load and per-report events.

use webstore::config::unix_now;
use webstore::logging::LogConfig;
use webstore::{seed, write_dataset, FileSource, ReportConfig, ReportKind, WebStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = LogConfig::info().init()?;

    let now = unix_now();
    let path = std::env::temp_dir().join("webstore-demo").join("shop.wsds");
    write_dataset(&path, &seed::sample_dataset(now))?;

    let source = FileSource::new(&path);
    let store = WebStore::with_config(&source, ReportConfig::default().with_now(now))?;

    for kind in ReportKind::ALL {
        println!("{}", store.run(kind)?);
    }

    // a second load of the same file swaps in an identical catalog
    let version = store.reload(&source)?;
    println!("reloaded {} as version {}", path.display(), version);
    Ok(())
}
