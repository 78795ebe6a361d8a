//! Envelopes of the `/api/contact` endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::lead::Lead;
use crate::domain::types::LeadId;
use crate::forms::FieldError;

/// Body of a successful intake (`201`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactCreatedResponse {
    pub success: bool,
    pub message: String,
    pub id: LeadId,
}

impl ContactCreatedResponse {
    pub fn new(id: LeadId) -> Self {
        Self {
            success: true,
            message: "Contact request submitted successfully".to_string(),
            id,
        }
    }
}

/// Body of a successful status update (`200`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusUpdatedResponse {
    pub success: bool,
    pub message: String,
    pub request: Lead,
}

impl StatusUpdatedResponse {
    pub fn new(request: Lead) -> Self {
        Self {
            success: true,
            message: "Status updated successfully".to_string(),
            request,
        }
    }
}

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn invalid_form(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: "Invalid form data".to_string(),
            errors,
        }
    }

    pub fn internal() -> Self {
        Self::new("Internal server error")
    }
}

fn default_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Optional narrowing of `GET /api/contact`. Without any parameter the full
/// list is returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub per_page: Option<usize>,
}

impl ContactListQuery {
    /// Page size applied when the caller asks for a page without a size.
    pub fn effective_per_page(&self) -> usize {
        self.per_page
            .unwrap_or_else(default_per_page)
            .clamp(1, MAX_ITEMS_PER_PAGE)
    }
}
