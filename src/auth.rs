//! Admin authentication: argon2 password check, HS256 bearer tokens and the
//! `AuthenticatedAdmin` request extractor.
//!
//! The token presented by a client is the only thing trusted for
//! authorization; it is verified on every request that needs an admin.

use std::future::{Ready, ready};

use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::dto::contact::ErrorResponse;
use crate::models::config::ServerConfig;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token encoding failed: {0}")]
    Encoding(String),

    #[error("authentication is not configured")]
    NotConfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self.status_code() {
            StatusCode::UNAUTHORIZED => ErrorResponse::new("Unauthorized"),
            _ => ErrorResponse::internal(),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// JWT claims carried by admin tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Admin email.
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Everything needed to check credentials and sign/verify tokens.
#[derive(Clone)]
pub struct AuthSettings {
    secret: String,
    admin_email: String,
    admin_password_hash: String,
    token_ttl: Duration,
}

impl AuthSettings {
    pub fn new(
        secret: impl Into<String>,
        admin_email: impl Into<String>,
        admin_password_hash: impl Into<String>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            secret: secret.into(),
            admin_email: admin_email.into().trim().to_lowercase(),
            admin_password_hash: admin_password_hash.into(),
            token_ttl,
        }
    }

    /// Checks the admin credentials.
    pub fn verify_credentials(&self, email: &str, password: &str) -> Result<(), AuthError> {
        if self.admin_password_hash.is_empty() {
            return Err(AuthError::NotConfigured);
        }
        let email_matches = email.trim().to_lowercase() == self.admin_email;
        // The hash is always checked so that both failure modes take the same time.
        let password_matches = verify_password(password, &self.admin_password_hash);
        if email_matches && password_matches {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Signs a token for the admin.
    pub fn issue_token(&self, email: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.trim().to_lowercase(),
            role: ADMIN_ROLE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    /// Verifies signature, expiry and role of a token.
    pub fn decode_token(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if data.claims.role != ADMIN_ROLE {
            return Err(AuthError::InvalidToken("not an admin token".to_string()));
        }
        Ok(data.claims)
    }
}

impl From<&ServerConfig> for AuthSettings {
    fn from(config: &ServerConfig) -> Self {
        AuthSettings::new(
            config.secret.clone(),
            config.admin_email.clone(),
            config.admin_password_hash.clone(),
            Duration::minutes(config.token_ttl_minutes),
        )
    }
}

/// Produces an argon2id PHC string for the given password.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Checks a password against a PHC string. Malformed hashes never verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            log::error!("Stored admin password hash is malformed: {err}");
            false
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// An admin whose bearer token was verified for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAdmin {
    pub email: String,
}

impl AuthenticatedAdmin {
    fn from_request_sync(req: &HttpRequest) -> Result<Self, AuthError> {
        let settings = req
            .app_data::<web::Data<AuthSettings>>()
            .ok_or(AuthError::NotConfigured)?;
        let token = bearer_token(req).ok_or(AuthError::MissingToken)?;
        let claims = settings.decode_token(token)?;
        Ok(Self { email: claims.sub })
    }
}

impl FromRequest for AuthenticatedAdmin {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = Self::from_request_sync(req);
        if let Err(err) = &result {
            log::warn!("Rejected admin request to {}: {err}", req.path());
        }
        ready(result)
    }
}
