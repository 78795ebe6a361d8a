//! Summary counters shown above the lead table.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::lead::Lead;
use crate::domain::types::LeadStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadStats {
    pub total: usize,
    pub today: usize,
    pub vehicle_types: usize,
    pub service_types: usize,
    pub pending: usize,
    pub contacted: usize,
    pub resolved: usize,
}

impl LeadStats {
    /// Counts over the full list, independent of any search.
    pub fn compute(leads: &[Lead], today: NaiveDate) -> Self {
        let mut stats = LeadStats {
            total: leads.len(),
            ..Default::default()
        };
        let mut vehicles = HashSet::new();
        let mut services = HashSet::new();

        for lead in leads {
            if lead.created_at.date() == today {
                stats.today += 1;
            }
            vehicles.insert(lead.vehicle_type);
            if let Some(service) = lead.service_type {
                services.insert(service);
            }
            match lead.status {
                LeadStatus::Pending => stats.pending += 1,
                LeadStatus::Contacted => stats.contacted += 1,
                LeadStatus::Resolved => stats.resolved += 1,
            }
        }

        stats.vehicle_types = vehicles.len();
        stats.service_types = services.len();
        stats
    }
}
