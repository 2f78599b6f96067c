use std::future::Future;

use crate::web::types::{ContactForm, SubmissionResult};

/// The backend the form submits to.
/// Implemented over HTTP by `BackendClient`; tests plug in their own.
pub trait ContactApi {
    /// `POST /api/create-contact`. A non-2xx answer is an `Err`, a 2xx answer is returned as is,
    /// even when it reports `success: false`.
    fn create_contact(
        &self,
        form: &ContactForm,
    ) -> impl Future<Output = Result<SubmissionResult, SubmitError>> + Send;

    /// `GET /api/health`, returns the status code of the response.
    fn health_check(&self) -> impl Future<Output = Result<u16, SubmitError>> + Send;
}

/// Why a submission attempt failed. Displays as the message shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Please fix the errors in the form")]
    InvalidForm,
    #[error("Request timed out. Please check your connection and try again.")]
    Timeout,
    #[error("Cannot connect to server. Please check your internet connection.")]
    Connect,
    /// Non-2xx answer; the message is the one reported by the server or `Server error: {status}`.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// 2xx answer with `success: false`.
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Request(String),
}

impl SubmitError {
    pub const DEFAULT_REJECTION: &'static str = "Failed to process your request";

    pub fn server(status: u16, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("Server error: {status}"));
        Self::Server { status, message }
    }

    pub fn rejected(message: Option<String>) -> Self {
        Self::Rejected(message.unwrap_or_else(|| Self::DEFAULT_REJECTION.to_string()))
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(er: reqwest::Error) -> Self {
        if er.is_timeout() {
            Self::Timeout
        } else if er.is_connect() {
            Self::Connect
        } else {
            Self::Request(er.to_string())
        }
    }
}
