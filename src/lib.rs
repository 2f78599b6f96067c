//! Lead capture: a landing page that hands out a file in exchange for a contact,
//! the backend proxy that forwards the contact to the mailing list,
//! and the form logic that drives the page.

pub mod app;
pub mod backend_client;
pub mod config;
pub mod contact_client;
mod error;
pub mod form;
pub mod templ_manager;
pub mod web;

// re-export
pub use app::{serve, App, AppState};
pub use backend_client::BackendClient;
pub use contact_client::ContactClient;
pub use error::{Error, Result};

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "leadmagnet=debug,tower_http=debug";

/// Human readable console logging, used in debug builds.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

/// JSON logging, used in release builds.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("leadmagnet=info")),
        )
        .init();
}
