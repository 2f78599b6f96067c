use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::{
    contact_client,
    web::{
        types::{ContactForm, InvalidField, SubmissionResult, ValidContact},
        ClientError, WebResult,
    },
    AppState,
};

pub const CONTACT_CREATED_MSG: &str = "Contact created successfully";

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum CreateContactError {
    #[error("invalid contact: {0}")]
    InvalidField(#[from] InvalidField),
    #[error("contact client error: {0}")]
    ContactClient(#[from] contact_client::Error),
}

impl CreateContactError {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        match self {
            Self::InvalidField(er) => (
                StatusCode::BAD_REQUEST,
                ClientError::InvalidInput(er.error.to_string()),
            ),
            Self::ContactClient(er) if er.is_timeout() => {
                (StatusCode::GATEWAY_TIMEOUT, ClientError::UpstreamTimeout)
            }
            Self::ContactClient(_) => (StatusCode::BAD_GATEWAY, ClientError::UpstreamFailure),
        }
    }
}

// ###################################
// ->   API
// ###################################
/// Validates the contact and forwards it to the mailing list.
#[tracing::instrument(
    name = "Creating a new contact",
    skip(app_state, form),
    fields(contact_email = %form.email)
)]
pub async fn create_contact(
    State(app_state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> WebResult<Json<SubmissionResult>> {
    let contact = ValidContact::try_from(form).map_err(CreateContactError::InvalidField)?;

    app_state
        .contact_client
        .create_contact(&contact)
        .await
        .map_err(CreateContactError::ContactClient)?;
    info!("SUCCESS");

    Ok(Json(SubmissionResult::ok(CONTACT_CREATED_MSG)))
}
