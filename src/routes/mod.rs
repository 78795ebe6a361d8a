//! HTTP handlers of the JSON API.

use actix_web::{HttpRequest, HttpResponse, error, web};

use crate::dto::contact::ErrorResponse;
use crate::forms::FieldError;
use crate::services::ServiceError;

pub mod auth;
pub mod contact;

/// Registers every API route under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/api")
                .service(contact::create_contact)
                .service(contact::list_contacts)
                .service(contact::update_contact_status)
                .service(auth::login),
        );
}

/// Malformed bodies are reported like any other form error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let body = ErrorResponse::invalid_form(vec![FieldError::new("body", err.to_string())]);
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        let body = ErrorResponse::invalid_form(vec![FieldError::new("query", err.to_string())]);
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

/// Maps a service failure onto a response without leaking internals.
pub fn error_response(err: ServiceError, context: &str) -> HttpResponse {
    match err {
        ServiceError::Validation(errors) => {
            HttpResponse::BadRequest().json(ErrorResponse::invalid_form(errors))
        }
        ServiceError::Form(message) => HttpResponse::BadRequest().json(ErrorResponse::new(message)),
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(ErrorResponse::new("Unauthorized"))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(ErrorResponse::new("Contact request not found"))
        }
        err => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse::internal())
        }
    }
}
