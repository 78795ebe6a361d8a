//! Admin sign-in.

use validator::Validate;

use crate::auth::{AuthError, AuthSettings};
use crate::forms::auth::LoginForm;
use crate::forms::field_errors;
use crate::services::{ServiceError, ServiceResult};

/// Checks the admin credentials and returns a signed bearer token.
pub fn login(settings: &AuthSettings, form: LoginForm) -> ServiceResult<String> {
    if let Err(errors) = form.validate() {
        return Err(ServiceError::Validation(field_errors(&errors)));
    }

    match settings.verify_credentials(&form.email, &form.password) {
        Ok(()) => {}
        Err(AuthError::InvalidCredentials) => {
            log::warn!("Failed admin sign-in for {}", form.email);
            return Err(ServiceError::Unauthorized);
        }
        Err(err) => {
            log::error!("Admin sign-in unavailable: {err}");
            return Err(ServiceError::Internal(err.to_string()));
        }
    }

    let token = settings.issue_token(&form.email).map_err(|err| {
        log::error!("Failed to issue admin token: {err}");
        ServiceError::Internal(err.to_string())
    })?;

    log::info!("Admin {} signed in", form.email);
    Ok(token)
}
