//! Diesel implementation of the lead repository traits.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        lead::{Lead, NewLead},
        types::{LeadId, LeadStatus},
    },
    models::lead::{Lead as DbLead, NewLead as DbNewLead},
    repository::{
        DieselRepository, LeadListQuery, LeadReader, LeadWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Substring pattern matching `term` literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn into_domain(rows: Vec<DbLead>) -> RepositoryResult<Vec<Lead>> {
    rows.into_iter()
        .map(|row| Lead::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl LeadReader for DieselRepository {
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)> {
        use crate::schema::contact_requests;

        let mut conn = self.conn()?;

        let pattern = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let query_builder = || {
            let mut items = contact_requests::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(pattern) = &pattern {
                items = items.filter(
                    contact_requests::name
                        .like(pattern.clone())
                        .escape('\\')
                        .or(contact_requests::phone.like(pattern.clone()).escape('\\'))
                        .or(contact_requests::email
                            .assume_not_null()
                            .like(pattern.clone())
                            .escape('\\'))
                        .or(contact_requests::vehicle_type
                            .like(pattern.clone())
                            .escape('\\'))
                        .or(contact_requests::service_type
                            .assume_not_null()
                            .like(pattern.clone())
                            .escape('\\')),
                );
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order(contact_requests::created_at.asc());
        if let Some(pagination) = &query.pagination {
            let Some(offset) = pagination.offset() else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(pagination.limit());
        }

        let rows = items.load::<DbLead>(&mut conn)?;

        Ok((total, into_domain(rows)?))
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        use crate::schema::contact_requests;

        let mut conn = self.conn()?;

        let row = DbNewLead::from_domain(new_lead, LeadId::new(), Utc::now().naive_utc());

        let created = diesel::insert_into(contact_requests::table)
            .values(&row)
            .get_result::<DbLead>(&mut conn)?;

        Ok(Lead::try_from(created)?)
    }

    fn update_lead_status(
        &self,
        id: &LeadId,
        status: LeadStatus,
    ) -> RepositoryResult<Option<Lead>> {
        use crate::schema::contact_requests;

        let mut conn = self.conn()?;

        let updated = diesel::update(contact_requests::table.find(id.to_string()))
            .set(contact_requests::status.eq(status.as_str()))
            .get_result::<DbLead>(&mut conn)
            .optional()?;

        updated
            .map(|row| Lead::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }
}
