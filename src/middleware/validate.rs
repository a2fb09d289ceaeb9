//! Field-presence and format checks run by handlers before touching storage.

use regex::Regex;
use serde::Serialize;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub param: String,
    pub msg: String,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            msg: msg.into(),
        }
    }
}

/// Collects every failing field so the client sees all problems at once
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"))
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, param: &str, msg: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError::new(param, msg));
        self
    }

    /// Present and not just whitespace
    pub fn required(&mut self, param: &str, value: Option<&str>, msg: &str) -> &mut Self {
        if is_blank(value) {
            self.push(param, msg);
        }
        self
    }

    pub fn email(&mut self, param: &str, value: Option<&str>, msg: &str) -> &mut Self {
        match value {
            Some(v) if email_pattern().is_match(v.trim()) => {}
            _ => {
                self.push(param, msg);
            }
        }
        self
    }

    pub fn min_length(&mut self, param: &str, value: Option<&str>, min: usize, msg: &str) -> &mut Self {
        if value.map_or(true, |v| v.chars().count() < min) {
            self.push(param, msg);
        }
        self
    }

    /// Parse an optional field; blank values yield `None` without an error
    pub fn parsed<T>(&mut self, param: &str, value: Option<&str>) -> Option<T>
    where
        T: FromStr<Err = String>,
    {
        if is_blank(value) {
            return None;
        }
        match value.unwrap_or_default().trim().parse() {
            Ok(parsed) => Some(parsed),
            Err(msg) => {
                self.push(param, msg);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> Result<(), ApiError> {
        match self.errors.first() {
            None => Ok(()),
            Some(first) => {
                let message = first.msg.clone();
                Err(ApiError::validation_error(message, self.errors))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeywordType;

    #[test]
    fn passes_when_everything_is_present() {
        let mut errors = FieldErrors::new();
        errors
            .required("name", Some("Checkout"), "Name is required")
            .email("email", Some("a@example.com"), "Please include a valid email")
            .min_length("password", Some("123456"), 6, "Password too short");
        assert!(errors.finish().is_ok());
    }

    #[test]
    fn whitespace_does_not_satisfy_required() {
        let mut errors = FieldErrors::new();
        errors.required("text", Some("   "), "Text is required");
        errors.required("type", None, "Type is required");

        match errors.finish() {
            Err(ApiError::ValidationError { message, field_errors }) => {
                assert_eq!(message, "Text is required");
                assert_eq!(field_errors.len(), 2);
                assert_eq!(field_errors[1].param, "type");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        let mut errors = FieldErrors::new();
        errors.email("email", Some("not-an-email"), "Please include a valid email");
        assert!(!errors.is_empty());
    }

    #[test]
    fn parsed_records_bad_values() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.parsed::<KeywordType>("type", Some("When")), Some(KeywordType::When));
        assert_eq!(errors.parsed::<KeywordType>("type", Some("")), None);
        assert!(errors.is_empty());

        assert_eq!(errors.parsed::<KeywordType>("type", Some("Whenever")), None);
        assert!(!errors.is_empty());
    }
}
