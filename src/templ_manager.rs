use std::collections::HashMap;

use chrono::Datelike;
use serde::Serialize;
use tera::Tera;
use tracing::info;

use crate::{
    config::DownloadConfig,
    web::types::{ContactForm, FieldValidation},
};

const TEMPLATES_GLOB: &str = "templates/**/*";

#[derive(Debug)]
pub struct TemplateManager {
    tera: Tera,
}

impl TemplateManager {
    pub fn init() -> Result<Self, tera::Error> {
        info!(
            "{:<20} - Initializing the Template manager",
            "templ manager"
        );
        let tera = Tera::new(TEMPLATES_GLOB)?;
        Ok(Self { tera })
    }

    /// Renders the landing page.
    pub fn render_landing_page(&self, page: &LandingPage<'_>) -> Result<String, tera::Error> {
        let ctx = tera::Context::from_serialize(page)?;
        self.tera.render("html/home.html", &ctx)
    }
}

/// Everything `html/home.html` needs.
#[derive(Debug, Serialize)]
pub struct LandingPage<'a> {
    pub display_name: &'a str,
    pub file_size: &'a str,
    pub year: i32,
    /// The values to put back into the inputs.
    pub form: &'a ContactForm,
    /// Per-field feedback keyed by the input id; empty on a fresh page.
    pub messages: HashMap<String, FieldValidation>,
    pub error_message: Option<String>,
}

impl<'a> LandingPage<'a> {
    pub fn new(download: &'a DownloadConfig, form: &'a ContactForm) -> Self {
        Self {
            display_name: &download.display_name,
            file_size: &download.file_size,
            year: chrono::Local::now().year(),
            form,
            messages: HashMap::new(),
            error_message: None,
        }
    }

    /// Adds the feedback for every field of `form`.
    pub fn with_validations(mut self) -> Self {
        self.messages = self
            .form
            .validations()
            .into_iter()
            .map(|(field, validation)| (field.to_string(), validation))
            .collect();
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}
