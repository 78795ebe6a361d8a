//! Admin client of the leads API: polling cache, view state and rendering.

use std::sync::Arc;
use std::time::Duration;

pub mod cache;
pub mod client;
pub mod poller;
pub mod render;
pub mod session;
pub mod stats;
pub mod view;

use crate::dashboard::cache::LeadCache;
use crate::dashboard::client::{ClientError, LeadsApi};
use crate::dashboard::poller::{Poller, spawn_poller};
use crate::dashboard::session::AdminSession;
use crate::domain::lead::Lead;
use crate::domain::types::{LeadId, LeadStatus};

/// Outcome of a status button press.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusChange {
    /// The lead already had that status; nothing was sent.
    Unchanged,
    Updated(Lead),
}

/// A signed-in dashboard: API access, session and the shared lead cache.
#[derive(Clone)]
pub struct Dashboard {
    api: Arc<LeadsApi>,
    session: AdminSession,
    cache: LeadCache,
}

impl Dashboard {
    pub fn new(api: LeadsApi, session: AdminSession) -> Self {
        Self {
            api: Arc::new(api),
            session,
            cache: LeadCache::new(),
        }
    }

    /// Signs in with the given credentials.
    pub async fn connect(api: LeadsApi, email: &str, password: &str) -> Result<Self, ClientError> {
        let session = api.login(email, password).await?;
        log::info!("Signed in as {}", session.email());
        Ok(Self::new(api, session))
    }

    pub fn cache(&self) -> &LeadCache {
        &self.cache
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    /// Manual refresh; runs alongside the poller.
    pub async fn refresh(&self) -> bool {
        self.cache.refresh(self.api.as_ref(), &self.session).await
    }

    pub fn start_polling(&self, every: Duration) -> Poller {
        spawn_poller(
            self.cache.clone(),
            Arc::clone(&self.api),
            self.session.clone(),
            every,
        )
    }

    /// Sends a status change and refetches on success. On failure the cached
    /// list is left as it was.
    pub async fn change_status(
        &self,
        id: LeadId,
        status: LeadStatus,
    ) -> Result<StatusChange, ClientError> {
        let current = self
            .cache
            .snapshot()
            .leads
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.status);
        if current == Some(status) {
            return Ok(StatusChange::Unchanged);
        }

        let lead = self
            .api
            .update_status(&self.session, id, status)
            .await
            .map_err(|err| {
                log::error!("Failed to update lead {id} to {status}: {err}");
                err
            })?;
        log::info!("Lead {id} is now {status}");
        self.refresh().await;
        Ok(StatusChange::Updated(lead))
    }
}
