//! Client-side search, ordering and row expansion.

use crate::domain::lead::Lead;
use crate::domain::types::{LeadId, LeadStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest first",
            SortOrder::Oldest => "Oldest first",
        }
    }
}

/// One status button of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusAction {
    pub status: LeadStatus,
    /// The current status is shown but cannot be chosen again.
    pub enabled: bool,
}

/// Buttons offered for a lead in its current state.
pub fn status_actions(lead: &Lead) -> Vec<StatusAction> {
    LeadStatus::ALL
        .iter()
        .map(|&status| StatusAction {
            status,
            enabled: status != lead.status,
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadsView {
    query: String,
    sort: SortOrder,
    expanded: Option<LeadId>,
}

impl LeadsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_search(&mut self) {
        self.query.clear();
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggled();
    }

    pub fn expanded(&self) -> Option<LeadId> {
        self.expanded
    }

    /// Opens the row, or closes it when it is already open. At most one row
    /// is expanded at a time.
    pub fn toggle_expanded(&mut self, id: LeadId) {
        self.expanded = if self.expanded == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn is_expanded(&self, id: &LeadId) -> bool {
        self.expanded.as_ref() == Some(id)
    }

    /// Leads matching the query in the selected order.
    pub fn visible<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        let mut rows: Vec<&Lead> = leads.iter().filter(|l| l.matches(&self.query)).collect();
        match self.sort {
            SortOrder::Newest => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::Oldest => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }
        rows
    }
}

/// Finds the lead whose id is `needle` or starts with it. Ambiguous prefixes
/// resolve to nothing.
pub fn resolve_lead_id(leads: &[Lead], needle: &str) -> Option<LeadId> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let mut found = leads
        .iter()
        .map(|l| l.id)
        .filter(|id| id.to_string().starts_with(&needle));
    match (found.next(), found.next()) {
        (Some(id), None) => Some(id),
        _ => None,
    }
}
