//! The landing page form: validation of the three inputs, the state of the submit control
//! and the sequence that runs when the visitor submits.
//!
//! The controller never touches the page directly, it goes through a `FormView`,
//! and it reaches the backend through a `ContactApi`.
//! `submit` takes `&mut self`, so there can only ever be one submission in flight.

mod api;
mod view;

pub use api::{ContactApi, SubmitError};
pub use view::FormView;

use std::time::Duration;

use chrono::Datelike;
use tracing::{debug, info, warn};

use crate::{
    config::DownloadConfig,
    web::types::{self, ContactForm, Field, FieldValidation},
};

pub const SUCCESS_MSG: &str = "Contact added successfully! Starting download...";

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Debug, Clone)]
pub struct FormSettings {
    /// The file that gets downloaded, relative to the page.
    pub file_name: String,
    pub file_display_name: String,
    pub file_size: String,
    /// The create-contact request is aborted after this long.
    pub api_timeout: Duration,
    /// Pause between the success message and the download.
    pub download_delay: Duration,
    /// The form is reset this long after a successful submission.
    pub success_message_duration: Duration,
    /// Error messages are hidden this long after they are shown.
    pub error_message_duration: Duration,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            file_name: "Valuable-Resource.pdf".to_string(),
            file_display_name: "Valuable Resource".to_string(),
            file_size: "1.5 MB".to_string(),
            api_timeout: Duration::from_secs(10),
            download_delay: Duration::from_secs(1),
            success_message_duration: Duration::from_secs(5),
            error_message_duration: Duration::from_secs(5),
        }
    }
}

impl From<&DownloadConfig> for FormSettings {
    fn from(config: &DownloadConfig) -> Self {
        Self {
            file_name: config.file_url(),
            file_display_name: config.display_name.clone(),
            file_size: config.file_size.clone(),
            ..Default::default()
        }
    }
}

/// The current values of the inputs. Nothing here outlives a page view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_valid: bool,
}

impl FormState {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Email => self.email = value,
        }
    }

    /// The request body, with every value trimmed.
    pub fn to_contact_form(&self) -> ContactForm {
        ContactForm::new(
            self.first_name.trim(),
            self.last_name.trim(),
            self.email.trim(),
        )
    }
}

pub struct FormController<A, V> {
    api: A,
    view: V,
    settings: FormSettings,
    state: FormState,
}

// ###################################
// ->   IMPLs
// ###################################
impl<A, V> FormController<A, V>
where
    A: ContactApi,
    V: FormView,
{
    pub fn new(api: A, view: V, settings: FormSettings) -> Self {
        Self {
            api,
            view,
            settings,
            state: FormState::default(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Fills in the static labels, disables submit and probes the backend.
    /// The probe result is only logged.
    pub async fn init(&mut self) {
        let year = chrono::Local::now().year();
        self.view.show_page_info(
            &self.settings.file_display_name,
            &self.settings.file_size,
            year,
        );
        self.set_submit_enabled(false);

        debug!(
            file_name = %self.settings.file_name,
            api_timeout = ?self.settings.api_timeout,
            "{:<12} - form initialized", "FORM"
        );

        self.check_backend_health().await;
    }

    async fn check_backend_health(&self) {
        match self.api.health_check().await {
            Ok(status) if (200..300).contains(&status) => info!("Backend health check: OK"),
            Ok(status) => warn!(status, "Backend health check: Failed"),
            Err(er) => warn!(error = %er, "Backend health check: Cannot connect"),
        }
    }

    /// The visitor typed into `field`.
    pub fn input(&mut self, field: Field, value: impl Into<String>) -> bool {
        self.state.set(field, value.into());
        self.validate_form()
    }

    /// `field` lost focus.
    pub fn blur(&mut self, field: Field) -> bool {
        self.validate_field(field);
        self.validate_form()
    }

    pub fn validate_field(&mut self, field: Field) -> FieldValidation {
        let validation = types::validate_field(field, self.state.value(field));
        self.view.show_field_validation(field, &validation);
        validation
    }

    /// Validates the fields in page order and stops at the first invalid one.
    /// Enables submit iff all of them are valid.
    pub fn validate_form(&mut self) -> bool {
        let is_valid = Field::ALL
            .into_iter()
            .all(|field| self.validate_field(field).ok);

        self.state.is_valid = is_valid;
        self.set_submit_enabled(is_valid);
        is_valid
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.view.set_submit_enabled(enabled);
        let label = if enabled {
            format!("Download {}", self.settings.file_display_name)
        } else {
            "Download File".to_string()
        };
        self.view.set_submit_label(&label);
    }

    /// The visitor pressed Enter. Submits only when the submit control is enabled,
    /// returns `None` otherwise.
    pub async fn enter(&mut self) -> Option<Result<(), SubmitError>> {
        if !self.state.is_valid {
            return None;
        }
        Some(self.submit().await)
    }

    /// Creates the contact and downloads the file.
    ///
    /// On success it returns after the form is reset. On failure it returns as soon as
    /// the error is shown, with the form usable again; hiding the error is left to the
    /// caller, see `error_timer`. Nothing is retried.
    #[tracing::instrument(name = "Submitting the form", skip_all)]
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        if !self.validate_form() {
            let er = SubmitError::InvalidForm;
            self.view.show_error(&er.to_string());
            return Err(er);
        }

        let form = self.state.to_contact_form();

        self.view.set_loading(true);
        self.view.set_submit_enabled(false);
        self.view.hide_messages();

        match self.create_contact(&form).await {
            Ok(()) => {
                self.finish_download().await;
                Ok(())
            }
            Err(er) => {
                warn!(error = ?er, "contact was not created");
                self.view.set_loading(false);
                self.set_submit_enabled(true);
                self.view.show_error(&er.to_string());
                Err(er)
            }
        }
    }

    async fn create_contact(&self, form: &ContactForm) -> Result<(), SubmitError> {
        let result = tokio::time::timeout(self.settings.api_timeout, self.api.create_contact(form))
            .await
            .unwrap_or(Err(SubmitError::Timeout))?;

        if result.success {
            Ok(())
        } else {
            Err(SubmitError::rejected(result.message))
        }
    }

    async fn finish_download(&mut self) {
        self.view.show_success(SUCCESS_MSG);

        tokio::time::sleep(self.settings.download_delay).await;
        self.view.trigger_download(&self.settings.file_name);
        info!(file_name = %self.settings.file_name, "download initiated");
        self.view.show_success(&format!(
            "Download started! Check your downloads folder for \"{}\"",
            self.settings.file_display_name
        ));

        let remaining = self
            .settings
            .success_message_duration
            .saturating_sub(self.settings.download_delay);
        tokio::time::sleep(remaining).await;
        self.reset();
        self.view.set_loading(false);
    }

    /// Elapses once an error shown now should be hidden again.
    /// It does not borrow the controller, so the form keeps taking events meanwhile.
    pub fn error_timer(&self) -> tokio::time::Sleep {
        tokio::time::sleep(self.settings.error_message_duration)
    }

    pub fn hide_messages(&mut self) {
        self.view.hide_messages();
    }

    /// Empties the form, disables submit, hides messages and focuses the first input.
    pub fn reset(&mut self) {
        self.state = FormState::default();
        self.view.clear_inputs();
        self.set_submit_enabled(false);
        self.view.hide_messages();
        self.view.focus(Field::FirstName);
    }
}
