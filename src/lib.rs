//! Citalia — client-side core of a clinic appointment manager.
//!
//! The crate owns everything between a rendering shell and the clinic's
//! REST backend: the in-memory appointment collection and its filtered
//! view, slot-availability derivation, upcoming/history schedule views,
//! patient aggregation, and the confirm → submit → apply workflow for
//! mutations. Shells render from `session::SessionState` and never
//! write appointment state directly.

pub mod api;
pub mod config;
pub mod models;
pub mod patients;
pub mod schedule;
pub mod session;
pub mod store;
pub mod workflow;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for an embedding shell or integration harness.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the crate's
/// default filter. Call once at startup.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} core starting v{}", config::APP_NAME, config::APP_VERSION);
}
