use resource_controller::{FormInput, UserInputError};
use serde::Serialize;

/// A customer testimonial as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestimonialForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl TestimonialForm {
    pub const INVALID_EMAIL: &'static str = "Enter a valid email address";

    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Empties every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// `local@domain.tld` with no whitespace; good enough for a form check.
fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

impl FormInput for TestimonialForm {
    fn validate(&self) -> Result<(), UserInputError> {
        let mut errors = UserInputError::default();
        errors.require("name", &self.name);
        errors.require("email", &self.email);
        if !self.email.trim().is_empty() && !looks_like_email(&self.email) {
            errors.reject("email", Self::INVALID_EMAIL);
        }
        errors.require("message", &self.message);
        errors.into_result()
    }
}
