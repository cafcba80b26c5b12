//! Console logging for the binaries.

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber at `warn`, overridable through `RUST_LOG`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
