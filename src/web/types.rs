//! Most of the structs in `web` module and their implementations live here.
//! Includes the contact form as received from the landing page, its validated counterpart,
//! the per-field validation rules and tests for those.

use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use unicode_segmentation::UnicodeSegmentation;

/// Shortest accepted name, counted in graphemes after trimming.
pub const MIN_NAME_LEN: usize = 2;

// ###################################
// ->   STRUCTS
// ###################################
/// The three inputs of the landing page form.
/// The string representation is the id of the input element (and the JSON key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
pub enum Field {
    #[strum(serialize = "firstName")]
    FirstName,
    #[strum(serialize = "lastName")]
    LastName,
    #[strum(serialize = "email")]
    Email,
}

impl Field {
    /// All fields in the order they appear on the page.
    pub const ALL: [Field; 3] = [Field::FirstName, Field::LastName, Field::Email];
}

/// Deserializable Contact
/// The contact as submitted by the landing page, it can have invalid fields.
/// Used as the JSON body of `POST /api/create-contact` and as the form body of `POST /download`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl ContactForm {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
        }
    }

    /// Runs `validate_field` on every field, in page order.
    pub fn validations(&self) -> Vec<(Field, FieldValidation)> {
        Field::ALL
            .into_iter()
            .map(|field| (field, validate_field(field, self.value(field))))
            .collect()
    }
}

/// Validated Contact
/// A contact with all the fields trimmed and validated, ready to be forwarded to the mailing list.
#[derive(Debug, Clone)]
pub struct ValidContact {
    pub email: ValidEmail,
    pub first_name: ValidName,
    pub last_name: ValidName,
}

impl TryFrom<ContactForm> for ValidContact {
    type Error = InvalidField;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let first_name =
            ValidName::parse(&form.first_name).map_err(InvalidField::on(Field::FirstName))?;
        let last_name =
            ValidName::parse(&form.last_name).map_err(InvalidField::on(Field::LastName))?;
        let email = ValidEmail::parse(&form.email).map_err(InvalidField::on(Field::Email))?;

        Ok(ValidContact {
            email,
            first_name,
            last_name,
        })
    }
}

/// Validated Email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    /// Trims the value and checks it against the `local@domain.tld` pattern.
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();

        if value.is_empty() {
            return Err(DataParsingError::EmailEmpty);
        }

        if regex_is_match!(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$", value) {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

/// Validated first or last name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidName(String);

impl AsRef<str> for ValidName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidName {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();

        if value.is_empty() {
            return Err(DataParsingError::NameEmpty);
        }

        if value.graphemes(true).count() < MIN_NAME_LEN {
            return Err(DataParsingError::NameTooShort);
        }

        Ok(ValidName(value.to_owned()))
    }
}

/// The outcome of validating a single field: whether it passed and the feedback shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidation {
    pub ok: bool,
    pub message: String,
}

impl FieldValidation {
    fn valid(field: Field) -> Self {
        let message = match field {
            Field::Email => "Valid email",
            Field::FirstName | Field::LastName => "Looks good!",
        };
        Self {
            ok: true,
            message: message.to_string(),
        }
    }

    fn invalid(error: DataParsingError) -> Self {
        Self {
            ok: false,
            message: error.to_string(),
        }
    }
}

/// Validates a single field. Names need at least two characters, emails need to look like
/// `local@domain.tld`. An empty value is always invalid.
pub fn validate_field(field: Field, value: &str) -> FieldValidation {
    let res = match field {
        Field::FirstName | Field::LastName => ValidName::parse(value).map(|_| ()),
        Field::Email => ValidEmail::parse(value).map(|_| ()),
    };

    match res {
        Ok(()) => FieldValidation::valid(field),
        Err(er) => FieldValidation::invalid(er),
    }
}

/// The body returned by `POST /api/create-contact`, both on success and on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmissionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

// ###################################
// ->   ERROR
// ###################################
/// Displays as the message shown to the visitor next to the offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, thiserror::Error)]
pub enum DataParsingError {
    #[error("This field is required")]
    NameEmpty,
    #[error("Must be at least 2 characters")]
    NameTooShort,

    #[error("Email is required")]
    EmailEmpty,
    #[error("Please enter a valid email")]
    EmailInvalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {error}")]
pub struct InvalidField {
    pub field: Field,
    #[source]
    pub error: DataParsingError,
}

impl InvalidField {
    fn on(field: Field) -> impl FnOnce(DataParsingError) -> Self {
        move |error| Self { field, error }
    }
}
