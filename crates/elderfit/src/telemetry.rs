use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Does nothing if the host already installed a subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
