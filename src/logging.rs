//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`; the run summary stays on
//! stdout. `RUST_LOG` overrides the verbosity flag.

use tracing_subscriber::EnvFilter;

/// Default filter directive for `-v` repetitions.
fn directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(verbose)));
    // A second init (e.g. from tests) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
