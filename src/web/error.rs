use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use super::routes::{CreateContactError, DownloadError};

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("create contact error: {0}")]
    CreateContact(#[from] CreateContactError),
    #[error("download error: {0}")]
    Download(#[from] DownloadError),

    #[error("templating error: {0}")]
    Tera(#[from] tera::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        match self {
            Error::CreateContact(er) => er.status_code_and_client_error(),
            Error::Download(er) => er.status_code_and_client_error(),
            Error::Tera(_) => (StatusCode::INTERNAL_SERVER_ERROR, ClientError::ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// What the client gets to know about an error. Displays as the `message` of the error body.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("{_0}")]
    InvalidInput(String),
    #[display("Failed to create contact")]
    UpstreamFailure,
    #[display("Mailing list service timed out")]
    UpstreamTimeout,
    #[display("Not found")]
    NotFound,
    #[display("Service Error!")]
    ServiceError,
}
