//! # Observability & Tracing
//!
//! Structured logging for slices, resource clients and views.
//!
//! Every log line carries `entity_type` (e.g. `Category`), so one filter level shows the
//! whole request path of a resource:
//!
//! ```text
//! INFO Slice started entity_type="Product" endpoint="productos"
//! INFO Write ok entity_type="Product" outcome="creado"
//! INFO Fetched entity_type="Product" generation=2 size=14
//! ```
//!
//! ```bash
//! RUST_LOG=info inventory-admin list productos     # lifecycle, writes, fetch sizes
//! RUST_LOG=debug inventory-admin list productos    # payloads, selections, generations
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the compact fmt subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    setup_tracing_with_default("warn");
}

/// Like [`setup_tracing`], using `fallback` when `RUST_LOG` is unset or invalid.
pub fn setup_tracing_with_default(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type identifies the source instead
        .compact()
        .try_init();
}
