//! HTTP client of the leads REST API.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode, header};
use serde_json::json;
use thiserror::Error;

use crate::dashboard::session::AdminSession;
use crate::domain::lead::Lead;
use crate::domain::types::{LeadId, LeadStatus};
use crate::dto::auth::LoginResponse;
use crate::dto::contact::{ContactCreatedResponse, ErrorResponse, StatusUpdatedResponse};
use crate::forms::auth::LoginForm;
use crate::forms::contact::ContactForm;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("not signed in or session expired")]
    Unauthorized,

    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },
}

impl ClientError {
    /// Builds the error for a non-success response from its status and body.
    pub fn from_response_parts(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return ClientError::Unauthorized;
        }
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string()
            });
        ClientError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

/// Thin typed wrapper over the `/api` endpoints.
#[derive(Debug, Clone)]
pub struct LeadsApi {
    http: Client,
    base_url: String,
}

impl LeadsApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Signs in and returns the session used by the other calls.
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminSession, ClientError> {
        let form = LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&form)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let body: LoginResponse = response.json().await?;
            return Err(ClientError::Status {
                status: StatusCode::UNAUTHORIZED.as_u16(),
                message: body.message,
            });
        }

        let body: LoginResponse = ensure_success(response).await?.json().await?;
        match body.token {
            Some(token) if body.status => Ok(AdminSession::new(token, email)),
            _ => Err(ClientError::Status {
                status: StatusCode::OK.as_u16(),
                message: body.message,
            }),
        }
    }

    pub async fn submit_contact(
        &self,
        form: &ContactForm,
    ) -> Result<ContactCreatedResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/api/contact"))
            .json(form)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// Fetches the complete list of leads.
    pub async fn fetch_leads(&self, session: &AdminSession) -> Result<Vec<Lead>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/contact"))
            .header(header::AUTHORIZATION, session.bearer())
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    pub async fn update_status(
        &self,
        session: &AdminSession,
        id: LeadId,
        status: LeadStatus,
    ) -> Result<Lead, ClientError> {
        let response = self
            .http
            .patch(self.url(&format!("/api/contact/{id}/status")))
            .header(header::AUTHORIZATION, session.bearer())
            .json(&json!({ "status": status }))
            .send()
            .await?;
        let body: StatusUpdatedResponse = ensure_success(response).await?.json().await?;
        Ok(body.request)
    }
}

/// Where the cache and the poller get the lead list from.
pub trait LeadSource: Send + Sync {
    fn fetch_leads(
        &self,
        session: &AdminSession,
    ) -> impl Future<Output = Result<Vec<Lead>, ClientError>> + Send;
}

impl LeadSource for LeadsApi {
    fn fetch_leads(
        &self,
        session: &AdminSession,
    ) -> impl Future<Output = Result<Vec<Lead>, ClientError>> + Send {
        LeadsApi::fetch_leads(self, session)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::from_response_parts(status, &body))
}
