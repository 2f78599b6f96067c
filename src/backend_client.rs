//! HTTP client for the backend proxy, used by the `FormController`.

use reqwest::{header::ACCEPT, Client, Url};
use tracing::debug;

use crate::{
    form::{ContactApi, SubmitError},
    web::types::{ContactForm, SubmissionResult},
};

#[derive(Debug, Clone)]
pub struct BackendClient {
    pub http_client: Client,
    pub base_url: Url,
}

impl BackendClient {
    /// `base_url` is the root of the backend, e.g. `https://leads.example.com`.
    pub fn new<S: AsRef<str>>(base_url: S, timeout: std::time::Duration) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;
        // Keep the last path segment when joining relative paths
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> core::result::Result<Url, SubmitError> {
        self.base_url
            .join(path)
            .map_err(|e| SubmitError::Request(e.to_string()))
    }
}

impl ContactApi for BackendClient {
    async fn create_contact(
        &self,
        form: &ContactForm,
    ) -> core::result::Result<SubmissionResult, SubmitError> {
        let url = self.endpoint("api/create-contact")?;

        let resp = self
            .http_client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            // The body might not even be JSON
            let message = resp
                .json::<SubmissionResult>()
                .await
                .ok()
                .and_then(|res| res.message);
            return Err(SubmitError::server(status.as_u16(), message));
        }

        let result = resp.json::<SubmissionResult>().await?;
        debug!("{:<12} - create-contact answered: {result:?}", "BACKEND");

        Ok(result)
    }

    async fn health_check(&self) -> core::result::Result<u16, SubmitError> {
        let url = self.endpoint("api/health")?;

        let resp = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        Ok(resp.status().as_u16())
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
