use crate::core::oracle::ExistenceOracle;
use crate::core::reconciler::DuplicateReconciler;
use crate::core::transfer::{StartOutcome, TransferJob};
use crate::core::watchdog::Watchdog;
use crate::domain::model::{CatalogEntry, EntryOutcome, SkipReason};
use crate::domain::ports::{Clock, ConfigProvider, ProcessControl, RemoteStore};
use crate::utils::error::Result;
use std::sync::Arc;

/// Per-entry decision logic and the poll loop that drives a transfer to a
/// terminal state.
///
/// State machine per entry:
///
/// ```text
/// NotDispatched --(link invalid | already exists)--> Skipped
/// NotDispatched --(link valid, not existing)------> Dispatched
/// Dispatched --(start succeeds)-------------------> Polling
/// Polling --(exists() || is_complete())-----------> Completed
/// Polling --(is_failed() | watchdog expired)------> Kicked -> restart
/// ```
pub struct EntryDispatcher<S, K, P, C>
where
    S: RemoteStore,
    K: Clock,
    P: ProcessControl,
    C: ConfigProvider,
{
    store: Arc<S>,
    clock: Arc<K>,
    process: Arc<P>,
    config: C,
    oracle: ExistenceOracle<S, K>,
    reconciler: DuplicateReconciler<S>,
}

impl<S, K, P, C> EntryDispatcher<S, K, P, C>
where
    S: RemoteStore,
    K: Clock,
    P: ProcessControl,
    C: ConfigProvider,
{
    pub fn new(store: Arc<S>, clock: Arc<K>, process: Arc<P>, config: C) -> Self {
        let oracle = ExistenceOracle::new(store.clone(), clock.clone());
        let reconciler = DuplicateReconciler::new(store.clone());
        Self {
            store,
            clock,
            process,
            config,
            oracle,
            reconciler,
        }
    }

    /// Resolve one catalog entry to a terminal outcome. Exactly one transfer
    /// job may be in flight for the entry, and none is started when the
    /// destination object already exists.
    pub async fn dispatch(&self, entry: &CatalogEntry) -> Result<EntryOutcome> {
        if !entry.has_usable_link() {
            tracing::info!("Skipped (no usable link): {}", entry.title());
            return Ok(EntryOutcome::Skipped(SkipReason::NoUsableLink));
        }
        if entry.is_demo {
            tracing::info!("Skipped (demo): {}", entry.title());
            return Ok(EntryOutcome::Skipped(SkipReason::Demo));
        }
        if self.oracle.exists(&entry.destination_path).await {
            tracing::info!("Skipped (already present): {}", entry.title());
            return Ok(EntryOutcome::Skipped(SkipReason::AlreadyPresent));
        }

        let job = match TransferJob::start(
            self.store.as_ref(),
            &entry.destination_path,
            &entry.direct_link,
        )
        .await?
        {
            StartOutcome::Started(job) => job,
            StartOutcome::Refused => {
                tracing::info!("Skipped (dispatch refused): {}", entry.title());
                return Ok(EntryOutcome::Skipped(SkipReason::DispatchRefused));
            }
        };

        tracing::info!("Transferring: {}...", entry.title());
        let watchdog = Watchdog::new(self.clock.as_ref(), self.config.watchdog_timeout());

        // The object can appear on the store slightly before or after the
        // job-status endpoint reflects completion; either signal is
        // authoritative.
        loop {
            if self.oracle.exists(&entry.destination_path).await
                || job.is_complete(self.store.as_ref()).await
            {
                break;
            }
            if job.is_failed(self.store.as_ref()).await {
                tracing::warn!("Remote job failed for {}, kicking", entry.title());
                self.process.restart()?;
                return Ok(EntryOutcome::Kicked);
            }
            if watchdog.expired(self.clock.as_ref()) {
                tracing::warn!("Watchdog budget exhausted for {}, kicking", entry.title());
                self.process.restart()?;
                return Ok(EntryOutcome::Kicked);
            }
            self.clock.sleep(self.config.poll_interval()).await;
        }

        tracing::info!("Finished: {}", entry.title());
        self.reconciler.prune(self.config.dest_root()).await;

        tracing::debug!("Sleeping before next transfer");
        self.clock.sleep(self.config.item_sleep()).await;
        Ok(EntryOutcome::Completed)
    }
}
