use crate::{backend_client, config, contact_client, web};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("web error: {0}")]
    Web(#[from] web::Error),
    #[error("contact client error: {0}")]
    ContactClient(#[from] contact_client::Error),
    #[error("backend client error: {0}")]
    BackendClient(#[from] backend_client::Error),
    #[error("templating error: {0}")]
    Tera(#[from] tera::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
