//! Shared lead list fed by manual refreshes and the poller.
//!
//! Every fetch is tagged with a sequence number taken before the request is
//! sent. A response is applied only if its number is higher than the last
//! applied one, so a slow early response can never overwrite a newer list.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::dashboard::client::{ClientError, LeadSource};
use crate::dashboard::session::AdminSession;
use crate::domain::lead::Lead;

/// Snapshot published to subscribers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheState {
    pub leads: Vec<Lead>,
    /// Set while at least one fetch newer than the applied one is in flight.
    pub loading: bool,
    /// Message of the latest failed fetch; cleared by the next success.
    pub last_error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub(crate) applied_seq: u64,
}

impl CacheState {
    pub fn applied_seq(&self) -> u64 {
        self.applied_seq
    }
}

#[derive(Clone)]
pub struct LeadCache {
    tx: Arc<watch::Sender<CacheState>>,
    issued: Arc<AtomicU64>,
}

impl Default for LeadCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadCache {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CacheState::default());
        Self {
            tx: Arc::new(tx),
            issued: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CacheState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> CacheState {
        self.tx.borrow().clone()
    }

    /// Reserves the sequence number of a new fetch and marks the cache busy.
    pub fn begin_request(&self) -> u64 {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_if_modified(|state| {
            let changed = !state.loading;
            state.loading = true;
            changed
        });
        seq
    }

    /// Applies the outcome of fetch `seq`. Returns `false` for stale results.
    pub fn apply(&self, seq: u64, result: Result<Vec<Lead>, ClientError>) -> bool {
        let latest = self.issued.load(Ordering::SeqCst);
        self.tx.send_if_modified(|state| {
            if seq <= state.applied_seq {
                return false;
            }
            state.applied_seq = seq;
            state.loading = seq < latest;
            match result {
                Ok(leads) => {
                    state.leads = leads;
                    state.last_error = None;
                    state.fetched_at = Some(Utc::now());
                }
                Err(err) => state.last_error = Some(err.to_string()),
            }
            true
        })
    }

    /// Fetches the full list and applies it unless a newer fetch won.
    pub async fn refresh<S>(&self, source: &S, session: &AdminSession) -> bool
    where
        S: LeadSource,
    {
        let seq = self.begin_request();
        let result = source.fetch_leads(session).await;
        if let Err(err) = &result {
            log::warn!("Failed to fetch leads: {err}");
        }
        self.apply(seq, result)
    }
}
