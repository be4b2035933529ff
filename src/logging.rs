use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` isn't set.
pub const DEFAULT_FILTER: &str = "info,kiss3d=warn";

/// Sets up console logging. Call once, before the window opens.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_timer(fmt::time::uptime())
        .init();
}
