//! Lead intake, listing and triage.

use crate::auth::AuthenticatedAdmin;
use crate::domain::lead::{Lead, NewLead};
use crate::domain::types::{LeadId, LeadStatus};
use crate::dto::contact::ContactListQuery;
use crate::forms::contact::ContactForm;
use crate::forms::status::StatusForm;
use crate::repository::{LeadListQuery, LeadReader, LeadWriter};
use crate::services::{ServiceError, ServiceResult};

/// Validates the submission and persists it as a new `pending` lead.
///
/// Validation failures never reach the repository.
pub fn submit_contact<R>(repo: &R, form: ContactForm) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    let new_lead = NewLead::try_from(form)?;

    let lead = repo.create_lead(&new_lead).map_err(|err| {
        log::error!("Error creating contact request: {err}");
        err
    })?;

    log::info!(
        "New {} lead {} received",
        lead.vehicle_type.as_str(),
        lead.id
    );
    Ok(lead)
}

/// Returns the stored leads, optionally narrowed by search and page.
pub fn list_contacts<R>(
    repo: &R,
    _admin: &AuthenticatedAdmin,
    params: ContactListQuery,
) -> ServiceResult<(usize, Vec<Lead>)>
where
    R: LeadReader + ?Sized,
{
    let mut query = LeadListQuery::new();

    if let Some(term) = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        query = query.search(term);
    }

    if params.page.is_some() || params.per_page.is_some() {
        query = query.paginate(params.page.unwrap_or(1), params.effective_per_page());
    }

    repo.list_leads(query).map_err(|err| {
        log::error!("Error fetching contact requests: {err}");
        ServiceError::from(err)
    })
}

/// Overwrites the status of one lead.
///
/// The status is checked before the identifier; an identifier that is not a
/// valid UUID cannot name a stored lead and is reported as not found.
pub fn update_contact_status<R>(
    repo: &R,
    admin: &AuthenticatedAdmin,
    id: &str,
    form: StatusForm,
) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    let status = LeadStatus::try_from(form)?;

    let id: LeadId = id.parse().map_err(|_| ServiceError::NotFound)?;

    let updated = repo.update_lead_status(&id, status).map_err(|err| {
        log::error!("Error updating contact request status: {err}");
        err
    })?;

    match updated {
        Some(lead) => {
            log::info!("{} set lead {id} to {status}", admin.email);
            Ok(lead)
        }
        None => Err(ServiceError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::repository::errors::{RepositoryError, RepositoryResult};

    /// In-memory repository keeping leads in insertion order.
    #[derive(Default)]
    struct MemoryRepo {
        leads: RefCell<Vec<Lead>>,
        fail: bool,
    }

    impl LeadReader for MemoryRepo {
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)> {
            if self.fail {
                return Err(RepositoryError::ConnectionError("down".into()));
            }
            let matching: Vec<Lead> = self
                .leads
                .borrow()
                .iter()
                .filter(|l| query.search.as_deref().is_none_or(|q| l.matches(q)))
                .cloned()
                .collect();
            let total = matching.len();
            let items = match query.pagination {
                Some(p) => match p.offset() {
                    Some(offset) => matching
                        .into_iter()
                        .skip(offset as usize)
                        .take(p.per_page)
                        .collect(),
                    None => Vec::new(),
                },
                None => matching,
            };
            Ok((total, items))
        }
    }

    impl LeadWriter for MemoryRepo {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
            if self.fail {
                return Err(RepositoryError::ConnectionError("down".into()));
            }
            let offset = self.leads.borrow().len() as i64;
            let lead = Lead {
                id: LeadId::new(),
                name: new_lead.name.clone(),
                phone: new_lead.phone.clone(),
                email: new_lead.email.clone(),
                vehicle_type: new_lead.vehicle_type,
                service_type: new_lead.service_type,
                message: new_lead.message.clone(),
                status: LeadStatus::Pending,
                created_at: Utc::now().naive_utc() + Duration::seconds(offset),
            };
            self.leads.borrow_mut().push(lead.clone());
            Ok(lead)
        }

        fn update_lead_status(
            &self,
            id: &LeadId,
            status: LeadStatus,
        ) -> RepositoryResult<Option<Lead>> {
            let mut leads = self.leads.borrow_mut();
            Ok(leads.iter_mut().find(|l| &l.id == id).map(|lead| {
                lead.status = status;
                lead.clone()
            }))
        }
    }

    fn admin() -> AuthenticatedAdmin {
        AuthenticatedAdmin {
            email: "admin@enliteev.com".to_string(),
        }
    }

    fn form(name: &str, phone: &str, vehicle: &str) -> ContactForm {
        ContactForm {
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
            vehicle_type: Some(vehicle.to_string()),
            ..ContactForm::default()
        }
    }

    fn status(value: &str) -> StatusForm {
        StatusForm {
            status: Some(serde_json::Value::String(value.to_string())),
        }
    }

    #[test]
    fn submission_missing_required_field_creates_nothing() {
        let repo = MemoryRepo::default();
        for incomplete in [
            form("", "9999999999", "2-wheeler"),
            form("Asha Rao", "", "2-wheeler"),
            form("Asha Rao", "9999999999", ""),
        ] {
            let result = submit_contact(&repo, incomplete);
            assert!(matches!(result, Err(ServiceError::Validation(_))));
        }
        assert!(repo.leads.borrow().is_empty());
    }

    #[test]
    fn valid_submission_creates_one_pending_lead() {
        let repo = MemoryRepo::default();
        let first = submit_contact(&repo, form("Asha Rao", "9999999999", "2-wheeler")).unwrap();
        let second = submit_contact(&repo, form("Ravi Kumar", "8888888888", "bus")).unwrap();

        assert_eq!(first.status, LeadStatus::Pending);
        assert_ne!(first.id, second.id);
        assert_eq!(repo.leads.borrow().len(), 2);
    }

    #[test]
    fn created_lead_round_trips_through_listing() {
        let repo = MemoryRepo::default();
        let created = submit_contact(&repo, form("Asha Rao", "9999999999", "2-wheeler")).unwrap();

        let (total, leads) = list_contacts(&repo, &admin(), ContactListQuery::default()).unwrap();

        assert_eq!(total, 1);
        assert_eq!(leads, vec![created]);
    }

    #[test]
    fn listing_applies_search_and_page() {
        let repo = MemoryRepo::default();
        submit_contact(&repo, form("Asha Rao", "9999999999", "2-wheeler")).unwrap();
        submit_contact(&repo, form("Ravi Kumar", "8888888888", "bus")).unwrap();
        submit_contact(&repo, form("Kumar Swamy", "7777777777", "bus")).unwrap();

        let params = ContactListQuery {
            q: Some(" kumar ".into()),
            page: Some(2),
            per_page: Some(1),
        };
        let (total, leads) = list_contacts(&repo, &admin(), params).unwrap();

        assert_eq!(total, 2);
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].name.as_str(), "Kumar Swamy");
    }

    #[test]
    fn listing_far_past_the_end_is_empty() {
        let repo = MemoryRepo::default();
        submit_contact(&repo, form("Asha Rao", "9999999999", "2-wheeler")).unwrap();

        let params = ContactListQuery {
            q: None,
            page: Some(usize::MAX),
            per_page: Some(100),
        };
        let (total, leads) = list_contacts(&repo, &admin(), params).unwrap();

        assert_eq!(total, 1);
        assert!(leads.is_empty());
    }

    #[test]
    fn listing_failure_surfaces_repository_error() {
        let repo = MemoryRepo {
            fail: true,
            ..MemoryRepo::default()
        };
        let result = list_contacts(&repo, &admin(), ContactListQuery::default());
        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[test]
    fn status_update_is_idempotent() {
        let repo = MemoryRepo::default();
        let lead = submit_contact(&repo, form("Asha Rao", "9999999999", "2-wheeler")).unwrap();
        let id = lead.id.to_string();

        let once = update_contact_status(&repo, &admin(), &id, status("contacted")).unwrap();
        let twice = update_contact_status(&repo, &admin(), &id, status("contacted")).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.status, LeadStatus::Contacted);
        assert_eq!(repo.leads.borrow().len(), 1);
    }

    #[test]
    fn status_update_on_unknown_id_is_not_found() {
        let repo = MemoryRepo::default();
        let missing = LeadId::new().to_string();

        let result = update_contact_status(&repo, &admin(), &missing, status("resolved"));
        assert!(matches!(result, Err(ServiceError::NotFound)));

        let result = update_contact_status(&repo, &admin(), "not-a-uuid", status("resolved"));
        assert!(matches!(result, Err(ServiceError::NotFound)));

        assert!(repo.leads.borrow().is_empty());
    }

    #[test]
    fn status_update_rejects_unknown_status_before_lookup() {
        let repo = MemoryRepo::default();
        let lead = submit_contact(&repo, form("Asha Rao", "9999999999", "2-wheeler")).unwrap();

        let result =
            update_contact_status(&repo, &admin(), &lead.id.to_string(), status("archived"));

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert_eq!(repo.leads.borrow()[0].status, LeadStatus::Pending);
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn admin() -> AuthenticatedAdmin {
        AuthenticatedAdmin {
            email: "admin@enliteev.com".to_string(),
        }
    }

    #[test]
    fn invalid_submission_never_touches_repository() {
        let mut repo = MockRepository::new();
        repo.expect_create_lead().times(0);

        let result = submit_contact(&repo, ContactForm::default());

        assert!(matches!(result, Err(ServiceError::Validation(errors)) if errors.len() == 3));
    }

    #[test]
    fn unparsable_id_never_touches_repository() {
        let mut repo = MockRepository::new();
        repo.expect_update_lead_status().times(0);
        let form = StatusForm {
            status: Some(serde_json::Value::String("resolved".into())),
        };

        let result = update_contact_status(&repo, &admin(), "42", form);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn full_listing_requests_no_pagination() {
        let mut repo = MockRepository::new();
        repo.expect_list_leads()
            .withf(|query| query == &LeadListQuery::new())
            .times(1)
            .returning(|_| Ok((0, Vec::new())));

        let (total, leads) = list_contacts(&repo, &admin(), ContactListQuery::default())
            .expect("should list leads");

        assert_eq!(total, 0);
        assert!(leads.is_empty());
    }
}
