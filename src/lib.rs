pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::clock::TokioClock;
pub use adapters::dropbox::DropboxStore;
pub use adapters::process::ExecRestart;
pub use config::CliConfig;
pub use core::dispatcher::EntryDispatcher;
pub use core::driver::RunDriver;
pub use core::reconciler::DuplicateReconciler;
pub use domain::model::{CatalogEntry, RunReport};
pub use utils::error::{FerryError, Result};
