use crate::core::dispatcher::EntryDispatcher;
use crate::core::reconciler::DuplicateReconciler;
use crate::domain::model::{CatalogEntry, EntryOutcome, RunReport};
use crate::domain::ports::{Clock, ConfigProvider, ProcessControl, RemoteStore};
use crate::utils::error::Result;

/// Drives the catalog through the dispatcher, strictly in file order, one
/// entry fully resolved before the next begins. Reconciles the destination
/// once more at the end of the run.
pub struct RunDriver<S, K, P, C>
where
    S: RemoteStore,
    K: Clock,
    P: ProcessControl,
    C: ConfigProvider,
{
    dispatcher: EntryDispatcher<S, K, P, C>,
    reconciler: DuplicateReconciler<S>,
    config: C,
}

impl<S, K, P, C> RunDriver<S, K, P, C>
where
    S: RemoteStore,
    K: Clock,
    P: ProcessControl,
    C: ConfigProvider,
{
    pub fn new(
        dispatcher: EntryDispatcher<S, K, P, C>,
        reconciler: DuplicateReconciler<S>,
        config: C,
    ) -> Self {
        Self {
            dispatcher,
            reconciler,
            config,
        }
    }

    pub async fn run(&self, entries: &[CatalogEntry]) -> Result<RunReport> {
        tracing::info!("Processing {} catalog entries", entries.len());

        let mut report = RunReport::default();
        for entry in entries {
            match self.dispatcher.dispatch(entry).await? {
                EntryOutcome::Completed => report.transferred += 1,
                EntryOutcome::Skipped(reason) => report.record_skip(reason),
                EntryOutcome::Kicked => {
                    // Only reachable when restart is mocked; the real
                    // ProcessControl replaces the process image.
                    report.kicked = true;
                    break;
                }
            }
        }

        let pruned = self.reconciler.prune(self.config.dest_root()).await;
        if pruned > 0 {
            tracing::info!("Final reconciliation removed {} duplicates", pruned);
        }

        tracing::info!(
            "Run complete: {} transferred, {} skipped",
            report.transferred,
            report.skipped()
        );
        Ok(report)
    }
}
