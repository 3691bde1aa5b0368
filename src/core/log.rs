//! Tracing subscriber setup for the binary.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

const CRATE_TARGET: &str = "fxconv";

/// Installs the global subscriber, writing to stderr so that `--json` output
/// on stdout stays clean.
///
/// Nothing is logged unless `verbose` is set; `RUST_LOG` can then narrow it.
pub fn init_logging(verbose: bool) {
    let crate_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(crate_level.to_string().to_lowercase()));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(Targets::new().with_target(CRATE_TARGET, crate_level))
        .with(env_filter)
        .init();
}
