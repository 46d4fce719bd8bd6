//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for
//! translated records. `RUST_LOG` wins over the verbosity flag.

use tracing_subscriber::EnvFilter;

/// Returns the default filter directive for a `-v` count.
pub const fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,skylog=debug",
        _ => "warn,skylog=trace",
    }
}

/// Installs the global subscriber. Safe to call more than once.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!crate::output::is_no_color())
        .try_init();
}
