//! Contains all the routes that this application can handle.

mod api;
mod download;
mod home;

// re-export errors
pub use api::create_contact::CreateContactError;
pub use download::DownloadError;

use crate::AppState;
use home::home;

use axum::{
    routing::{get, post},
    Router,
};

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/download", post(download::download_post))
        .route("/files/{file_name}", get(download::download_file))
        .nest("/api", api_routes())
        .with_state(app_state)
}

/// API - Routes nested under "/api" path, called by the landing page
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/create-contact", post(api::create_contact))
        .route("/health", get(api::health))
}
