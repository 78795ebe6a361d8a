//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::lead::{Lead, NewLead};
use crate::domain::types::{LeadId, LeadStatus};
use crate::repository::errors::RepositoryResult;
use crate::repository::{LeadListQuery, LeadReader, LeadWriter};

mock! {
    pub Repository {}

    impl LeadReader for Repository {
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
        fn update_lead_status(
            &self,
            id: &LeadId,
            status: LeadStatus,
        ) -> RepositoryResult<Option<Lead>>;
    }
}
