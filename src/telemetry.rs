//! Opt-in tracing bootstrap.
//!
//! The engine only emits `tracing` events; it never installs a subscriber on
//! its own. Hosts that want output without wiring their own subscriber can
//! enable the `telemetry` feature and call [`init_default_tracing`] once at
//! startup.

/// Installs a compact stdout subscriber honoring `RUST_LOG`.
///
/// Returns `false` when the `telemetry` feature is disabled or another
/// global subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_impl()
}

#[cfg(feature = "telemetry")]
fn init_impl() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scatter_rs=debug,info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(not(feature = "telemetry"))]
fn init_impl() -> bool {
    false
}
