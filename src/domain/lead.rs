//! Lead (service booking request) aggregate.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    LeadEmail, LeadId, LeadMessage, LeadName, LeadStatus, PhoneNumber, ServiceType, VehicleType,
};

/// A persisted customer service-inquiry record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    pub name: LeadName,
    pub phone: PhoneNumber,
    pub email: Option<LeadEmail>,
    pub vehicle_type: VehicleType,
    pub service_type: Option<ServiceType>,
    pub message: Option<LeadMessage>,
    pub status: LeadStatus,
    pub created_at: NaiveDateTime,
}

/// Validated intake payload. Identifier, status and timestamp are assigned by
/// the store.
#[derive(Clone, Debug, PartialEq)]
pub struct NewLead {
    pub name: LeadName,
    pub phone: PhoneNumber,
    pub email: Option<LeadEmail>,
    pub vehicle_type: VehicleType,
    pub service_type: Option<ServiceType>,
    pub message: Option<LeadMessage>,
}

impl NewLead {
    #[must_use]
    pub fn new(name: LeadName, phone: PhoneNumber, vehicle_type: VehicleType) -> Self {
        Self {
            name,
            phone,
            email: None,
            vehicle_type,
            service_type: None,
            message: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: LeadEmail) -> Self {
        self.email = Some(email);
        self
    }

    #[must_use]
    pub fn with_service_type(mut self, service_type: ServiceType) -> Self {
        self.service_type = Some(service_type);
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: LeadMessage) -> Self {
        self.message = Some(message);
        self
    }
}

impl Lead {
    /// Lower-cased text the dashboard search runs against.
    pub fn search_haystack(&self) -> [String; 5] {
        [
            self.name.to_lowercase(),
            self.phone.to_lowercase(),
            self.email
                .as_ref()
                .map(|e| e.as_str().to_lowercase())
                .unwrap_or_default(),
            self.vehicle_type.as_str().to_string(),
            self.service_type
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
        ]
    }

    /// Case-insensitive substring match over name, phone, email, vehicle and
    /// service type. An empty query matches every lead.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.search_haystack()
            .iter()
            .any(|field| field.contains(&query))
    }
}
