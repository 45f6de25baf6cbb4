//! Diagnostic logging for the command-line front end
//!
//! Log output goes to stderr so stdout carries only ciphertext, plaintext
//! and digests. The library modules never log.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` overrides `default_level` when set. Safe to call more than
/// once; later calls are ignored.
pub fn init_logging(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
