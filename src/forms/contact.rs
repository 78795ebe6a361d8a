//! Contact (booking request) submission form.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::lead::NewLead;
use crate::domain::types::{
    LeadEmail, LeadMessage, LeadName, PhoneNumber, ServiceType, TypeConstraintError, VehicleType,
};
use crate::forms::{FieldError, FormError, field_errors, invalid_choice, not_blank};

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Payload of `POST /api/contact`.
///
/// Every field is optional at the serde level so that missing values surface
/// as field errors rather than as a body parse failure.
pub struct ContactForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required, custom(function = "not_blank"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required, custom(function = "not_blank"))]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required, custom(function = "validate_vehicle_type"))]
    pub vehicle_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_service_type"))]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn validate_vehicle_type(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    value.parse::<VehicleType>().map(|_| ()).map_err(|_| {
        let allowed: Vec<&str> = VehicleType::ALL.iter().map(|v| v.as_str()).collect();
        invalid_choice("vehicle_type", &allowed)
    })
}

fn validate_service_type(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    value.parse::<ServiceType>().map(|_| ()).map_err(|_| {
        let allowed: Vec<&str> = ServiceType::ALL.iter().map(|v| v.as_str()).collect();
        invalid_choice("service_type", &allowed)
    })
}

/// Optional text inputs treat blank strings as absent.
fn optional<T, F>(value: Option<String>, build: F) -> Result<Option<T>, TypeConstraintError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    match value.filter(|s| !s.trim().is_empty()) {
        Some(value) => match build(value) {
            Ok(v) => Ok(Some(v)),
            Err(TypeConstraintError::EmptyString) => Ok(None),
            Err(err) => Err(err),
        },
        None => Ok(None),
    }
}

fn required_field(field: &str, err: TypeConstraintError) -> FormError {
    FormError::Validation(vec![FieldError::new(field, err.to_string())])
}

impl TryFrom<ContactForm> for NewLead {
    type Error = FormError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        if let Err(errors) = form.validate() {
            return Err(FormError::Validation(field_errors(&errors)));
        }

        let name = LeadName::new(form.name.unwrap_or_default())
            .map_err(|e| required_field("name", e))?;
        let phone = PhoneNumber::new(form.phone.unwrap_or_default())
            .map_err(|e| required_field("phone", e))?;
        let vehicle_type = VehicleType::try_from(form.vehicle_type.unwrap_or_default())
            .map_err(|e| required_field("vehicleType", e))?;

        let email = optional(form.email, LeadEmail::new).map_err(|e| required_field("email", e))?;
        let service_type = optional(form.service_type, ServiceType::try_from)
            .map_err(|e| required_field("serviceType", e))?;
        let message =
            optional(form.message, LeadMessage::new).map_err(|e| required_field("message", e))?;

        Ok(NewLead {
            name,
            phone,
            email,
            vehicle_type,
            service_type,
            message,
        })
    }
}
