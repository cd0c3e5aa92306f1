//! Logging initialization.
//!
//! Logs go to stderr so stdout stays machine-parseable. Verbosity comes
//! from `-v` counts unless `JT_LOG` overrides the filter entirely.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Verbosity: default `warn`, `-v` = `info`, `-vv` = `debug`,
/// `-vvv` = `trace`. `--quiet` drops to `error`. Safe to call more than
/// once; later calls are no-ops.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_env("JT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("jt={level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Test helper: quiet subscriber so assertions stay readable.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("jt=debug"))
        .with_writer(std::io::stderr)
        .with_test_writer()
        .try_init();
}
