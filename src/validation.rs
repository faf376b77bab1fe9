use crate::errors::{DomainError, DomainResult, ValidationError};
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

/// A trait that request types implement for validation.
pub trait Validate {
    /// Validates the value and returns an error if validation fails.
    fn validate(&self) -> DomainResult<()>;
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    })
}

/// Struct for configuring validations in a fluent style
#[derive(Default)]
pub struct ValidationBuilder<T> {
    field_name: String,
    value: Option<T>,
    errors: Vec<ValidationError>,
}

/// Generic validation implementations
impl<T> ValidationBuilder<T> {
    pub fn new(field_name: &str, value: Option<T>) -> Self {
        Self {
            field_name: field_name.to_string(),
            value,
            errors: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self
    where
        T: Default + PartialEq,
    {
        if self.value.is_none() || self.value == Some(T::default()) {
            self.errors.push(ValidationError::required(&self.field_name));
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> DomainResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            // Return the first error for simplicity
            Err(DomainError::Validation(self.errors[0].clone()))
        }
    }
}

/// String-specific validations
impl ValidationBuilder<String> {
    /// Rejects missing, empty, and whitespace-only values.
    pub fn not_blank(mut self) -> Self {
        let blank = match &self.value {
            Some(value) => value.trim().is_empty(),
            None => true,
        };
        if blank {
            self.errors.push(ValidationError::required(&self.field_name));
        }
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        if let Some(value) = &self.value {
            if value.len() < min {
                self.errors.push(ValidationError::min_length(&self.field_name, min));
            }
        }
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        if let Some(value) = &self.value {
            if value.len() > max {
                self.errors.push(ValidationError::max_length(&self.field_name, max));
            }
        }
        self
    }

    pub fn matches_pattern(mut self, pattern: &Regex, message: &str) -> Self {
        if let Some(value) = &self.value {
            if !pattern.is_match(value) {
                self.errors.push(ValidationError::format(&self.field_name, message));
            }
        }
        self
    }

    pub fn email(self) -> Self {
        let pattern = email_regex();
        self.matches_pattern(pattern, "must be a valid email address")
    }
}

/// Uuid-specific validations
impl ValidationBuilder<Uuid> {
    pub fn not_nil(mut self) -> Self {
        let nil = match &self.value {
            Some(value) => value.is_nil(),
            None => true,
        };
        if nil {
            self.errors.push(ValidationError::required(&self.field_name));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_blank_rejects_whitespace() {
        let result = ValidationBuilder::new("farm_name", Some("   ".to_string()))
            .not_blank()
            .validate();
        assert!(result.is_err());

        let result = ValidationBuilder::new("farm_name", Some("Green Acres".to_string()))
            .not_blank()
            .validate();
        assert!(result.is_ok());
    }

    #[test]
    fn email_format_is_checked() {
        let result = ValidationBuilder::new("owner_email", Some("not-an-email".to_string()))
            .not_blank()
            .email()
            .validate();
        assert!(result.is_err());

        let result = ValidationBuilder::new("owner_email", Some("jens@example.dk".to_string()))
            .not_blank()
            .email()
            .validate();
        assert!(result.is_ok());
    }

    #[test]
    fn not_nil_rejects_the_nil_uuid() {
        let result = ValidationBuilder::new("consultant_id", Some(Uuid::nil()))
            .not_nil()
            .validate();
        assert!(result.is_err());

        let result = ValidationBuilder::new("consultant_id", Some(Uuid::new_v4()))
            .not_nil()
            .validate();
        assert!(result.is_ok());
    }
}
