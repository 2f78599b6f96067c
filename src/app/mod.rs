pub mod serve;

// re-export
pub use serve::serve;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderValue, Method,
};
use derive_more::Deref;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use crate::{
    config::{AppConfig, ConfigError, DownloadConfig},
    templ_manager::TemplateManager,
    ContactClient, Result,
};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
    pub cors: CorsLayer,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener, cors: CorsLayer) -> Self {
        App {
            app_state,
            listener,
            cors,
        }
    }

    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let tm = TemplateManager::init()?;
        let contact_timeout = config.contact_config.timeout();
        let contact_client = ContactClient::new(
            &config.contact_config.url,
            config.contact_config.auth_token,
            config.contact_config.list_ids,
            contact_timeout,
        )?;
        let cors = cors_layer(&config.net_config.allowed_origins)?;

        let app_state = AppState::new(tm, contact_client, config.download_config);

        let listener = TcpListener::bind(config.net_config.socket_addr()).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener, cors);
        Ok(app)
    }
}

/// Browsers may call the API from the configured origins only.
fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.clone()))
        })
        .collect::<core::result::Result<Vec<_>, _>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    Ok(cors)
}

pub struct InternalState {
    pub templ_mgr: TemplateManager,
    pub contact_client: ContactClient,
    pub download: DownloadConfig,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(
        templ_mgr: TemplateManager,
        contact_client: ContactClient,
        download: DownloadConfig,
    ) -> Self {
        AppState(Arc::new(InternalState {
            templ_mgr,
            contact_client,
            download,
        }))
    }
}
