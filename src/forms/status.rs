//! Status update payload.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::types::LeadStatus;
use crate::forms::FormError;

/// Payload of `PATCH /api/contact/{id}/status`. The status is kept as raw
/// JSON so that a wrong type is reported as a form error.
#[derive(Debug, Default, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: Option<Value>,
}

impl TryFrom<StatusForm> for LeadStatus {
    type Error = FormError;

    fn try_from(form: StatusForm) -> Result<Self, Self::Error> {
        let raw = match form.status {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            _ => return Err(FormError::MissingStatus),
        };
        raw.parse::<LeadStatus>()
            .map_err(|_| FormError::UnknownStatus(raw))
    }
}
