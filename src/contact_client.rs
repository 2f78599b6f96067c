//! HTTP client for the third-party mailing-list API (SendFox) that stores the contacts.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use crate::web::types::ValidContact;

#[derive(Debug)]
pub struct ContactClient {
    pub http_client: Client,
    pub url: reqwest::Url,
    pub list_ids: Vec<u64>,
    auth_token: SecretString,
}

impl ContactClient {
    pub fn new<S: AsRef<str>>(
        url: S,
        auth_token: SecretString,
        list_ids: Vec<u64>,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(ContactClient {
            http_client,
            url,
            list_ids,
            auth_token,
        })
    }

    /// Creates the contact on the mailing list. Any non-2xx status is an error.
    pub async fn create_contact(&self, contact: &ValidContact) -> Result<()> {
        let url = self
            .url
            .join("contacts")
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let body = NewContact {
            email: contact.email.as_ref(),
            first_name: contact.first_name.as_ref(),
            last_name: contact.last_name.as_ref(),
            lists: &self.list_ids,
        };

        let resp = self
            .http_client
            .post(url)
            .bearer_auth(self.auth_token.expose_secret())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        debug!("{:<12} - mailing list responded with {}", "CONTACTS", resp.status());

        Ok(())
    }
}

#[derive(Serialize)]
pub struct NewContact<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub lists: &'a [u64],
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

impl Error {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Reqwest(er) if er.is_timeout())
    }
}
