//! Command-line front end for `jslex_core`.
//!
//! The binary reads a file or stdin and prints one token per line. The
//! dumping logic lives here so it can be tested against in-memory readers
//! and writers.

mod dump;

use std::sync::Once;

pub use dump::{run, CliError, DumpOptions, Summary};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=jslex_core=debug` or `RUST_LOG=jslex_core=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set; stdout carries the token dump.
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
