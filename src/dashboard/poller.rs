//! Periodic background refetch of the lead list.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::dashboard::cache::LeadCache;
use crate::dashboard::client::LeadSource;
use crate::dashboard::session::AdminSession;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Running poll loop. Dropping it stops the polling.
#[derive(Debug)]
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn stop(self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns a task refetching the full list every `every`, starting now.
pub fn spawn_poller<S>(
    cache: LeadCache,
    source: Arc<S>,
    session: AdminSession,
    every: Duration,
) -> Poller
where
    S: LeadSource + 'static,
{
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            log::debug!("Polling leads");
            cache.refresh(source.as_ref(), &session).await;
        }
    });
    Poller { handle }
}
