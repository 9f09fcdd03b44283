use crate::domain::model::{JobId, JobStatus};
use crate::domain::ports::RemoteStore;
use crate::utils::error::{FerryError, Result};

/// One in-flight remote copy-by-URL operation. Owned by the dispatcher for
/// a single entry and discarded when its poll loop exits.
#[derive(Debug)]
pub struct TransferJob {
    job_id: JobId,
}

/// Result of asking the store to start a transfer. Remote-side refusals are
/// not errors; the dispatcher marks the entry skipped for this run.
#[derive(Debug)]
pub enum StartOutcome {
    Started(TransferJob),
    Refused,
}

impl TransferJob {
    /// Start a copy-by-URL job. Propagates only on malformed input; any
    /// remote error is logged and reported as `Refused`.
    pub async fn start<S: RemoteStore>(
        store: &S,
        dest: &str,
        source: &str,
    ) -> Result<StartOutcome> {
        if dest.is_empty() || source.is_empty() {
            return Err(FerryError::TransferError {
                message: format!("malformed transfer request: dest='{}' source='{}'", dest, source),
            });
        }

        match store.copy_from_url(dest, source).await {
            Ok(job_id) => {
                tracing::debug!("Started job {} for {}", job_id.as_str(), dest);
                Ok(StartOutcome::Started(Self { job_id }))
            }
            Err(e) => {
                tracing::warn!("Could not dispatch transfer for {}: {}", dest, e);
                Ok(StartOutcome::Refused)
            }
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    /// Pure status query; polling cadence belongs to the caller. A transport
    /// error on the status call counts as still-pending and is retried on the
    /// next tick.
    pub async fn is_complete<S: RemoteStore>(&self, store: &S) -> bool {
        matches!(self.status(store).await, JobStatus::Complete)
    }

    pub async fn is_failed<S: RemoteStore>(&self, store: &S) -> bool {
        matches!(self.status(store).await, JobStatus::Failed)
    }

    async fn status<S: RemoteStore>(&self, store: &S) -> JobStatus {
        match store.job_status(&self.job_id).await {
            Ok(status) => status,
            Err(e) => {
                tracing::debug!(
                    "Status check for job {} failed ({}), treating as pending",
                    self.job_id.as_str(),
                    e
                );
                JobStatus::Pending
            }
        }
    }
}
