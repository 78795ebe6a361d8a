//! Plain-text rendering of the dashboard.

use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;

use crate::dashboard::cache::CacheState;
use crate::dashboard::stats::LeadStats;
use crate::dashboard::view::{LeadsView, status_actions};
use crate::domain::lead::Lead;

/// Everything shown in one frame.
pub struct Screen<'a> {
    pub state: &'a CacheState,
    pub view: &'a LeadsView,
    pub today: NaiveDate,
}

impl Display for Screen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let leads = &self.state.leads;
        let stats = LeadStats::compute(leads, self.today);

        writeln!(
            f,
            "Total {} | Today {} | Vehicle types {} | Service types {}",
            stats.total, stats.today, stats.vehicle_types, stats.service_types
        )?;
        writeln!(
            f,
            "Pending {} | Contacted {} | Resolved {}",
            stats.pending, stats.contacted, stats.resolved
        )?;
        if let Some(err) = &self.state.last_error {
            writeln!(f, "! Failed to load leads: {err} (type `refresh` to retry)")?;
        }
        if self.state.loading {
            writeln!(f, "Refreshing...")?;
        }
        if !self.view.query().is_empty() {
            writeln!(f, "Search: {}", self.view.query())?;
        }
        writeln!(f, "Sort: {}", self.view.sort_order().label())?;
        writeln!(f)?;

        let rows = self.view.visible(leads);
        if rows.is_empty() {
            writeln!(f, "No leads found.")?;
        }
        for lead in &rows {
            write_row(f, lead)?;
            if self.view.is_expanded(&lead.id) {
                write_details(f, lead)?;
            }
        }

        writeln!(f)?;
        write!(f, "Showing {} of {} leads", rows.len(), leads.len())
    }
}

fn short_id(lead: &Lead) -> String {
    lead.id.to_string().chars().take(8).collect()
}

fn write_row(f: &mut Formatter<'_>, lead: &Lead) -> fmt::Result {
    writeln!(
        f,
        "{}  {}  {:<20} {:<14} {:<10} {:<12} [{}]",
        short_id(lead),
        lead.created_at.format("%Y-%m-%d %H:%M"),
        lead.name.as_str(),
        lead.phone.as_str(),
        lead.vehicle_type.label(),
        lead.service_type.map(|s| s.label()).unwrap_or("-"),
        lead.status.label(),
    )
}

fn write_details(f: &mut Formatter<'_>, lead: &Lead) -> fmt::Result {
    writeln!(f, "    Id: {}", lead.id)?;
    writeln!(
        f,
        "    Email: {}",
        lead.email.as_ref().map(|e| e.as_str()).unwrap_or("-")
    )?;
    writeln!(
        f,
        "    Message: {}",
        lead.message
            .as_ref()
            .map(|m| m.as_str())
            .unwrap_or("No message provided")
    )?;
    let buttons: Vec<String> = status_actions(lead)
        .into_iter()
        .map(|action| {
            if action.enabled {
                action.status.as_str().to_string()
            } else {
                format!("({} - current)", action.status.as_str())
            }
        })
        .collect();
    writeln!(f, "    Set status: {}", buttons.join(" "))
}

/// Renders a frame to a string.
pub fn render(state: &CacheState, view: &LeadsView, today: NaiveDate) -> String {
    Screen { state, view, today }.to_string()
}
