pub mod config;
pub mod error;
pub mod model;
pub mod notifier;
pub mod poller;
pub mod practicum;
pub mod status;
pub mod tracker;

/// Install the fmt subscriber used by every binary. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}
