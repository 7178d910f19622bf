use crate::submit::{ContactPayload, SubmitOutcome};
use regex::Regex;
use std::sync::LazyLock;
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const ANONYMOUS: &str = "Portfolio Visitor";
const DEFAULT_BODY: &str = "Hello, I would like to get in touch with you.";

pub const FIX_ERRORS: &str = "Please fix the errors in the form";
pub const SUBMITTING: &str = "Submitting your message...";
pub const SENT: &str = "Message sent successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn validate(self, value: &str) -> Option<&'static str> {
        let trimmed = value.trim();
        match self {
            Self::Name if trimmed.is_empty() => Some("Name is required"),
            Self::Name if trimmed.chars().count() < 2 => {
                Some("Name must be at least 2 characters")
            }
            Self::Email if trimmed.is_empty() => Some("Email is required"),
            Self::Email if !EMAIL_PATTERN.is_match(value) => {
                Some("Please enter a valid email address")
            }
            Self::Message if trimmed.is_empty() => Some("Message is required"),
            Self::Message if trimmed.chars().count() < 10 => {
                Some("Message must be at least 10 characters")
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Message => self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<&'static str> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::iter().all(|f| self.get(f).is_none())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    Ready(ContactPayload),
    Invalid,
    InFlight,
}

/// Contact form state: values, per-field errors, status and the
/// announcement text read out to assistive tech.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: FormValues,
    errors: FieldErrors,
    status: SubmitStatus,
    submitting: bool,
    announcement: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn announcement(&self) -> &str {
        &self.announcement
    }

    /// Ignores values equal to the current one, so programmatic resets of
    /// the entry widgets do not clear a fresh status.
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        if self.values.get(field) == value {
            return;
        }
        *self.values.slot(field) = value;
        *self.errors.slot(field) = None;
        self.status = SubmitStatus::Idle;
    }

    /// Validates one field on focus loss. Only adds errors; editing clears them.
    pub fn blur(&mut self, field: Field) {
        if let Some(error) = field.validate(self.values.get(field)) {
            *self.errors.slot(field) = Some(error);
        }
    }

    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.submitting {
            return SubmitAttempt::InFlight;
        }

        let mut errors = FieldErrors::default();
        for field in Field::iter() {
            *errors.slot(field) = field.validate(self.values.get(field));
        }

        if !errors.is_empty() {
            self.errors = errors;
            self.status = SubmitStatus::Error;
            self.announcement = FIX_ERRORS.to_owned();
            return SubmitAttempt::Invalid;
        }

        self.submitting = true;
        self.status = SubmitStatus::Idle;
        self.announcement = SUBMITTING.to_owned();
        SubmitAttempt::Ready(ContactPayload::from_values(&self.values))
    }

    /// Returns true when the values were cleared, which is the only time
    /// the input widgets need to be rewritten from the form.
    pub fn finish_submit(&mut self, outcome: &SubmitOutcome) -> bool {
        self.submitting = false;
        match outcome {
            SubmitOutcome::Delivered => {
                self.status = SubmitStatus::Success;
                self.announcement = SENT.to_owned();
                self.values = FormValues::default();
                self.errors = FieldErrors::default();
                true
            }
            failure => {
                self.status = SubmitStatus::Error;
                self.announcement = failure.message();
                false
            }
        }
    }

    /// Pre-filled compose link, available regardless of form state.
    pub fn mailto(&self, recipient: &str) -> String {
        let v = &self.values;
        let subject = format!("Contact from {}", display_name(&v.name));
        let body = if v.message.is_empty() {
            DEFAULT_BODY.to_owned()
        } else {
            format!("{}\n\n\u{2014} {} ({})", v.message, v.name, v.email)
        };
        format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            urlencoding::encode(&subject),
            urlencoding::encode(&body)
        )
    }
}

pub(crate) fn display_name(name: &str) -> &str {
    if name.is_empty() { ANONYMOUS } else { name }
}
