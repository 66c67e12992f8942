//! Telemetry helpers for applications embedding `cxpress`.
//!
//! Tracing setup stays explicit and opt-in. Hosts can call
//! `init_default_tracing` or wire their own `tracing` subscriber and filters.

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter is read from `RUST_LOG` and defaults to `info`.
/// Returns `true` when initialization succeeds and `false` when the feature is
/// disabled or a global subscriber was already installed by the host.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
