use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::config::FormConfig;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Field values of the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Any other named inputs, posted alongside the required three
    #[serde(skip)]
    pub extra: Vec<(String, String)>,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            extra: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }

    /// Build from (input name, value) pairs; unknown names go to `extra`
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in fields {
            let (key, value) = (key.into(), value.into());
            match key.as_str() {
                "name" => form.name = value,
                "email" => form.email = value,
                "message" => form.message = value,
                _ => form.extra.push((key, value)),
            }
        }
        form
    }

    /// Form-encoded pairs in submission order
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("message".to_string(), self.message.clone()),
        ];
        fields.extend(self.extra.iter().cloned());
        fields
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid name")]
    Name,

    #[error("Please enter a valid email address")]
    Email,

    #[error("Please enter a message (at least {0} characters)")]
    Message(usize),
}

/// Field rules, checked in order name, email, message
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    min_name_len: usize,
    min_message_len: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&FormConfig::default())
    }
}

impl Validator {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            min_name_len: config.min_name_len,
            min_message_len: config.min_message_len,
        }
    }

    /// Lengths count UTF-16 code units, the way a browser measures input
    /// values. Values are not trimmed.
    pub fn validate(&self, form: &ContactForm) -> Result<(), ValidationError> {
        if input_len(&form.name) < self.min_name_len {
            return Err(ValidationError::Name);
        }
        if !email_regex().is_match(&form.email) {
            return Err(ValidationError::Email);
        }
        if input_len(&form.message) < self.min_message_len {
            return Err(ValidationError::Message(self.min_message_len));
        }
        Ok(())
    }
}

#[inline]
fn input_len(value: &str) -> usize {
    value.encode_utf16().count()
}
