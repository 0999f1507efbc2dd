//! Logging setup using `tracing_subscriber`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs a stderr fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` raises pixelhide to debug.
pub fn setup_logging(verbose: bool) {
    let dirs = if verbose {
        "warn,pixelhide=debug"
    } else {
        "warn,pixelhide=info"
    };

    let main_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(dirs)))
        .with(main_layer)
        .init()
}
