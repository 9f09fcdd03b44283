use crate::domain::model::StatOutcome;
use crate::domain::ports::{Clock, RemoteStore};
use std::sync::Arc;
use std::time::Duration;

/// Cooldown observed when the remote store reports rate limiting before the
/// probe resolves to "not present" and the caller retries on its next tick.
pub const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(600);

/// Resilient "does object X exist?" wrapper. Never errors: not-found,
/// rate-limited and transient failures all resolve to `false`, so a false
/// negative costs one poll interval, never correctness. Callers must not
/// treat a single `false` as a terminal signal.
pub struct ExistenceOracle<S: RemoteStore, K: Clock> {
    store: Arc<S>,
    clock: Arc<K>,
}

impl<S: RemoteStore, K: Clock> ExistenceOracle<S, K> {
    pub fn new(store: Arc<S>, clock: Arc<K>) -> Self {
        Self { store, clock }
    }

    pub async fn exists(&self, path: &str) -> bool {
        match self.store.stat(path).await {
            StatOutcome::Found => true,
            StatOutcome::NotFound => false,
            StatOutcome::RateLimited => {
                tracing::warn!(
                    "Rate limited while checking {}, cooling down for {}s",
                    path,
                    RATE_LIMIT_COOLDOWN.as_secs()
                );
                self.clock.sleep(RATE_LIMIT_COOLDOWN).await;
                false
            }
            StatOutcome::Transient => {
                tracing::debug!("Transient failure while checking {}, will retry", path);
                false
            }
        }
    }
}
