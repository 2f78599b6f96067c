//! The file download: served on its own, and as the answer to the landing page form
//! when it is submitted without JavaScript.

use axum::{
    extract::{Path, State},
    http::{
        header::{InvalidHeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Response},
    Form,
};
use tracing::{debug, info, warn};

use crate::{
    config::DownloadConfig,
    form::SubmitError,
    templ_manager::LandingPage,
    web::{
        routes::CreateContactError,
        types::{ContactForm, ValidContact},
        ClientError, WebResult,
    },
    AppState,
};

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("requested file is not downloadable: {0}")]
    FileNotFound(String),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        match self {
            Self::FileNotFound(_) => (StatusCode::NOT_FOUND, ClientError::NotFound),
            Self::InvalidHeader(_) | Self::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ClientError::ServiceError)
            }
        }
    }
}

// ###################################
// ->   ROUTES
// ###################################
/// `GET /files/{file_name}`. Only the configured file can be downloaded.
#[tracing::instrument(name = "Serving the download", skip(app_state))]
pub async fn download_file(
    State(app_state): State<AppState>,
    Path(file_name): Path<String>,
) -> WebResult<Response> {
    if file_name != app_state.download.file_name {
        return Err(DownloadError::FileNotFound(file_name).into());
    }

    Ok(attachment(&app_state.download).await?)
}

/// `POST /download`. Same rules as `/api/create-contact`, but answers with HTML:
/// the landing page with feedback if anything is wrong, the file otherwise.
#[tracing::instrument(
    name = "Downloading through the landing page form",
    skip(app_state, form),
    fields(contact_email = %form.email)
)]
pub async fn download_post(
    State(app_state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> WebResult<Response> {
    let contact = match ValidContact::try_from(form.clone()) {
        Ok(contact) => contact,
        Err(er) => {
            debug!(error = %er, "rejecting the form");
            let page = LandingPage::new(&app_state.download, &form)
                .with_validations()
                .with_error(SubmitError::InvalidForm.to_string());
            return render(&app_state, StatusCode::BAD_REQUEST, &page);
        }
    };

    if let Err(er) = app_state.contact_client.create_contact(&contact).await {
        let er = CreateContactError::ContactClient(er);
        warn!(error = ?er, "contact was not created");
        let (status, client_error) = er.status_code_and_client_error();
        let page =
            LandingPage::new(&app_state.download, &form).with_error(client_error.to_string());
        return render(&app_state, status, &page);
    }
    info!("contact created");

    Ok(attachment(&app_state.download).await?)
}

// ###################################
// ->   HELPERS
// ###################################
async fn attachment(download: &DownloadConfig) -> Result<Response, DownloadError> {
    let bytes = tokio::fs::read(download.file_path()).await?;

    let content_type = HeaderValue::from_str(&download.content_type)?;
    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", download.file_name))?;

    info!(size = bytes.len(), "sending {}", download.file_name);

    Ok((
        [(CONTENT_TYPE, content_type), (CONTENT_DISPOSITION, disposition)],
        bytes,
    )
        .into_response())
}

fn render(app_state: &AppState, status: StatusCode, page: &LandingPage<'_>) -> WebResult<Response> {
    let body = app_state.templ_mgr.render_landing_page(page)?;
    Ok((status, Html(body)).into_response())
}
