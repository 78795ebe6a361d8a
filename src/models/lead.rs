//! Diesel models for stored contact requests.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::{Lead as DomainLead, NewLead as DomainNewLead};
use crate::domain::types::{
    LeadEmail, LeadId, LeadMessage, LeadName, LeadStatus, PhoneNumber, ServiceType,
    TypeConstraintError, VehicleType,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::contact_requests)]
/// Diesel model for [`crate::domain::lead::Lead`].
pub struct Lead {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub vehicle_type: String,
    pub service_type: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contact_requests)]
/// Insertable form of [`Lead`]; the caller supplies the generated id and timestamp.
pub struct NewLead<'a> {
    pub id: String,
    pub name: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub vehicle_type: &'a str,
    pub service_type: Option<&'a str>,
    pub message: Option<&'a str>,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}

impl<'a> NewLead<'a> {
    /// Builds the row for a fresh lead in the initial `pending` state.
    pub fn from_domain(lead: &'a DomainNewLead, id: LeadId, created_at: NaiveDateTime) -> Self {
        Self {
            id: id.to_string(),
            name: lead.name.as_str(),
            phone: lead.phone.as_str(),
            email: lead.email.as_ref().map(LeadEmail::as_str),
            vehicle_type: lead.vehicle_type.as_str(),
            service_type: lead.service_type.map(ServiceType::as_str),
            message: lead.message.as_ref().map(LeadMessage::as_str),
            status: LeadStatus::Pending.as_str(),
            created_at,
        }
    }
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(lead: Lead) -> Result<Self, Self::Error> {
        Ok(Self {
            id: lead.id.parse()?,
            name: LeadName::new(lead.name)?,
            phone: PhoneNumber::new(lead.phone)?,
            email: lead.email.map(LeadEmail::new).transpose()?,
            vehicle_type: VehicleType::try_from(lead.vehicle_type)?,
            service_type: lead.service_type.map(ServiceType::try_from).transpose()?,
            message: lead.message.map(LeadMessage::new).transpose()?,
            status: LeadStatus::try_from(lead.status)?,
            created_at: lead.created_at,
        })
    }
}
