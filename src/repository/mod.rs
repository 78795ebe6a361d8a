//! Repository traits and their Diesel-backed implementation.

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        lead::{Lead, NewLead},
        types::{LeadId, LeadStatus},
    },
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod lead;
#[cfg(feature = "test-mocks")]
pub mod mock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows skipped before the page; `None` when the page lies beyond any
    /// addressable row.
    pub fn offset(&self) -> Option<i64> {
        let skipped = (self.page.max(1) - 1).checked_mul(self.per_page)?;
        i64::try_from(skipped).ok()
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// Listing filter. The default query is a full scan in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadListQuery {
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl LeadListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait LeadReader {
    /// Returns the total number of matches and the requested slice.
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
}

pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    /// Overwrites the status; `None` when no lead has the given id.
    fn update_lead_status(&self, id: &LeadId, status: LeadStatus)
    -> RepositoryResult<Option<Lead>>;
}

/// Diesel repository shared by the HTTP handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_counts_rows_of_previous_pages() {
        let page = Pagination {
            page: 3,
            per_page: 20,
        };
        assert_eq!(page.offset(), Some(40));
        assert_eq!(page.limit(), 20);

        let first = Pagination {
            page: 0,
            per_page: 20,
        };
        assert_eq!(first.offset(), Some(0));
    }

    #[test]
    fn huge_page_has_no_offset() {
        let page = Pagination {
            page: usize::MAX,
            per_page: 100,
        };
        assert_eq!(page.offset(), None);

        let page = Pagination {
            page: usize::MAX / 2,
            per_page: 2,
        };
        assert_eq!(page.offset(), None);
    }
}
