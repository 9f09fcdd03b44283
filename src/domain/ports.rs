use crate::domain::model::{JobId, JobStatus, StatOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// The remote object store, consumed as an opaque capability.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Probe for an object. Never errors; failures map to `StatOutcome`.
    async fn stat(&self, path: &str) -> StatOutcome;

    /// Names of the objects directly under `path`.
    async fn list_children(&self, path: &str) -> Result<Vec<String>>;

    async fn delete(&self, path: &str) -> Result<()>;

    /// Ask the store to fetch `source` into `dest` server-side.
    async fn copy_from_url(&self, dest: &str, source: &str) -> Result<JobId>;

    async fn job_status(&self, job: &JobId) -> Result<JobStatus>;
}

/// Time source and sleeper. Injectable so the watchdog deadline, poll
/// cadence, cooldown and pacing are all observable in tests.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    async fn sleep(&self, dur: Duration);
}

/// Full-process restart with the original argument vector. The production
/// implementation replaces the process image and only returns on failure.
pub trait ProcessControl: Send + Sync {
    fn restart(&self) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn dest_root(&self) -> &str;
    fn poll_interval(&self) -> Duration;
    fn item_sleep(&self) -> Duration;
    fn watchdog_timeout(&self) -> Duration;
}
