//! # Controller Errors
//!
//! Every way a load or submit can go wrong ends up as a [`ControllerError`]
//! stored inside [`ResourceState::Failure`](crate::ResourceState::Failure).
//! The error is cloneable so that state snapshots can be handed to any number
//! of observers.
//!
//! The taxonomy has three layers:
//!
//! - [`TransportError`] - network failure, non-2xx status, undecodable body
//! - [`ValidationError`] - the response arrived but its shape is wrong
//! - [`UserInputError`] - local form validation rejected the payload before dispatch

use crate::validation::FieldKind;
use thiserror::Error;

/// Failures raised by a [`Transport`](crate::Transport) implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout and the like.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status code.
    #[error("Request to {path} failed with HTTP {status}")]
    Status { path: String, status: u16 },

    /// The response body was not valid JSON.
    #[error("Response body could not be decoded: {0}")]
    Decode(String),

    /// The request could not be built (bad path, bad base URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Defects found while classifying a fetched payload.
///
/// `at` is a JSON path to the offending value: `$` for the root,
/// `$[2]` for the third item of a collection, `$.requirements[0]` for a
/// nested item.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields at {at}: {}", .fields.join(", "))]
    MissingFields { at: String, fields: Vec<String> },

    #[error("Duplicate items found at {at}: {key} = {value} appears in items {first} and {second}")]
    DuplicateItems {
        at: String,
        key: String,
        value: String,
        first: usize,
        second: usize,
    },

    #[error("Invalid data types at {at}: field `{field}` expected {expected}, found {found}")]
    TypeMismatch {
        at: String,
        field: String,
        expected: FieldKind,
        found: FieldKind,
    },

    #[error("Unexpected data structure at {at}: {detail}")]
    UnexpectedShape { at: String, detail: String },
}

impl ValidationError {
    pub(crate) fn unexpected(at: impl Into<String>, detail: impl Into<String>) -> Self {
        ValidationError::UnexpectedShape {
            at: at.into(),
            detail: detail.into(),
        }
    }
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Local form validation failure.
///
/// Collects one entry per rejected field so the presentation layer can show
/// the message next to the right input.
#[derive(Debug, Clone, Default, Error, PartialEq, Eq)]
#[error("Invalid input: {}", describe(.errors))]
pub struct UserInputError {
    pub errors: Vec<FieldError>,
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} ({})", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl UserInputError {
    pub const REQUIRED: &'static str = "This field is required";

    /// Records `field` as missing when `value` is blank.
    pub fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.reject(field, Self::REQUIRED);
        }
        self
    }

    pub fn reject(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
        self
    }

    /// The first message recorded for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when nothing was rejected.
    pub fn into_result(self) -> Result<(), UserInputError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// The error carried by a failed [`ResourceState`](crate::ResourceState).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    UserInput(#[from] UserInputError),
}

impl ControllerError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ControllerError::Transport(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ControllerError::Validation(_))
    }

    pub fn is_user_input(&self) -> bool {
        matches!(self, ControllerError::UserInput(_))
    }
}
