use actix_web::{HttpResponse, Responder, post, web};

use crate::auth::AuthSettings;
use crate::dto::auth::LoginResponse;
use crate::dto::contact::ErrorResponse;
use crate::forms::auth::LoginForm;
use crate::services::{ServiceError, auth as auth_service};

#[post("/auth/login")]
/// Exchange admin credentials for a bearer token.
pub async fn login(
    settings: web::Data<AuthSettings>,
    web::Json(form): web::Json<LoginForm>,
) -> impl Responder {
    match auth_service::login(settings.get_ref(), form) {
        Ok(token) => HttpResponse::Ok().json(LoginResponse::success(token)),
        Err(ServiceError::Unauthorized) => {
            HttpResponse::Unauthorized().json(LoginResponse::failure("Invalid credentials"))
        }
        Err(ServiceError::Validation(errors)) => {
            HttpResponse::BadRequest().json(ErrorResponse::invalid_form(errors))
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse::internal())
        }
    }
}
