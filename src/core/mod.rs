pub mod catalog;
pub mod dispatcher;
pub mod driver;
pub mod oracle;
pub mod reconciler;
pub mod transfer;
pub mod watchdog;

pub use crate::domain::model::{CatalogEntry, EntryOutcome, RunReport, SkipReason};
pub use crate::domain::ports::{Clock, ConfigProvider, ProcessControl, RemoteStore};
pub use crate::utils::error::Result;
