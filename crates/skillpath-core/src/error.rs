//! Error taxonomy for plan generation and curation.
//!
//! Three failure classes reach the caller: the provider call failed
//! ([`CurationError::Generation`]), no payload could be located in the
//! model's text ([`CurationError::Extraction`]), or the payload or request
//! arguments were invalid ([`CurationError::Validation`]). Resource lookup
//! failures never appear here; the curator absorbs them.

use std::fmt;

use thiserror::Error;

use crate::plan::parser::PayloadKind;
use crate::provider::ProviderError;

/// A single field-level problem found while validating a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Location within the payload, e.g. `[2].mini_challenge` or `$`.
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Invalid request arguments or a payload of the wrong shape.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyArgument { field: &'static str },

    #[error("day number {0} is out of range (expected 1 to 7)")]
    DayOutOfRange(i64),

    #[error("failed to parse JSON: {source}\nRaw output:\n{raw_preview}")]
    Malformed {
        source: serde_json::Error,
        raw_preview: String,
    },

    #[error("payload does not match the expected shape: {}", join_field_errors(.errors))]
    Shape { errors: Vec<FieldError> },
}

impl ValidationError {
    /// True when the caller supplied bad arguments (as opposed to the model
    /// producing a bad payload).
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::EmptyArgument { .. } | Self::DayOutOfRange(_))
    }
}

/// Errors surfaced by the plan generator, day expander and curator.
#[derive(Debug, Error)]
pub enum CurationError {
    #[error("generation failed: {0}")]
    Generation(#[from] ProviderError),

    #[error("no JSON {expected} found in model output\nRaw output:\n{raw_preview}")]
    Extraction {
        expected: PayloadKind,
        raw_preview: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CurationError {
    /// True when the request itself was invalid rather than a downstream
    /// failure. The HTTP layer maps this to `400`.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::Validation(v) if v.is_request_error())
    }
}
