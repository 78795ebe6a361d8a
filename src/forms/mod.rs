//! Inbound payloads accepted by the JSON API.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

pub mod auth;
pub mod contact;
pub mod status;

/// A single field-level validation failure reported back to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("invalid form data: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("Status is required and must be a string")]
    MissingStatus,

    #[error("unknown status: {0}")]
    UnknownStatus(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Name of a form field as it appears in the JSON payload.
fn api_field_name(field: &str) -> &str {
    match field {
        "vehicle_type" => "vehicleType",
        "service_type" => "serviceType",
        other => other,
    }
}

fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Flattens `validator` output into a stable, field-sorted list.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut result: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is required", humanize(&field)),
                };
                FieldError::new(api_field_name(&field), message)
            })
        })
        .collect();
    result.sort_by(|a, b| a.field.cmp(&b.field));
    result
}

/// Rejects strings made only of whitespace.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub(crate) fn invalid_choice(code: &'static str, allowed: &[&str]) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(format!(
        "must be one of: {}",
        allowed.join(", ")
    )))
}
