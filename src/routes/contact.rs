use actix_web::{HttpResponse, Responder, get, patch, post, web};

use crate::auth::AuthenticatedAdmin;
use crate::dto::contact::{ContactCreatedResponse, ContactListQuery, StatusUpdatedResponse};
use crate::forms::contact::ContactForm;
use crate::forms::status::StatusForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::contact as contact_service;

pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

#[post("/contact")]
/// Accept a booking request from the public contact form.
pub async fn create_contact(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ContactForm>,
) -> impl Responder {
    match contact_service::submit_contact(repo.get_ref(), form) {
        Ok(lead) => HttpResponse::Created().json(ContactCreatedResponse::new(lead.id)),
        Err(err) => error_response(err, "Error creating contact request"),
    }
}

#[get("/contact")]
/// List stored leads for the admin dashboard.
pub async fn list_contacts(
    admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
    query: web::Query<ContactListQuery>,
) -> impl Responder {
    match contact_service::list_contacts(repo.get_ref(), &admin, query.into_inner()) {
        Ok((total, leads)) => HttpResponse::Ok()
            .insert_header((TOTAL_COUNT_HEADER, total.to_string()))
            .json(leads),
        Err(err) => error_response(err, "Error fetching contact requests"),
    }
}

#[patch("/contact/{id}/status")]
/// Move a lead to another triage state.
pub async fn update_contact_status(
    admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
    web::Json(form): web::Json<StatusForm>,
) -> impl Responder {
    match contact_service::update_contact_status(repo.get_ref(), &admin, &id, form) {
        Ok(lead) => HttpResponse::Ok().json(StatusUpdatedResponse::new(lead)),
        Err(err) => error_response(err, "Error updating contact request status"),
    }
}
