use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_exists, validate_non_empty_string, validate_positive_number, validate_url,
    Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pkg-ferry")]
#[command(about = "Back up the contents of a TSV catalog into Dropbox via save_url jobs")]
pub struct CliConfig {
    #[arg(short = 'c', long, help = "Path to the TSV catalog file")]
    pub catalog: Option<String>,

    #[arg(long, conflicts_with = "catalog", help = "Fetch the TSV catalog from a URL")]
    pub catalog_url: Option<String>,

    #[arg(long, default_value = "/tsv-backup/", help = "Destination root on Dropbox")]
    pub destination: String,

    #[arg(long, default_value = "60", help = "Seconds between transfer status checks")]
    pub interval: u64,

    #[arg(
        long,
        default_value = "300",
        help = "Seconds to wait before starting the next transfer"
    )]
    pub sleep: u64,

    #[arg(
        long,
        default_value = "3600",
        help = "Whole-transfer time budget in seconds before the process is kicked"
    )]
    pub kick: u64,

    #[arg(long, default_value = "oauth.conf", help = "File holding the Dropbox access token")]
    pub auth: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn dest_root(&self) -> &str {
        &self.destination
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    fn item_sleep(&self) -> Duration {
        Duration::from_secs(self.sleep)
    }

    fn watchdog_timeout(&self) -> Duration {
        Duration::from_secs(self.kick)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match (&self.catalog, &self.catalog_url) {
            (Some(path), None) => validate_file_exists("catalog", path)?,
            (None, Some(url)) => validate_url("catalog_url", url)?,
            _ => {
                return Err(crate::utils::error::FerryError::MissingConfigError {
                    field: "catalog or catalog-url".to_string(),
                })
            }
        }

        validate_non_empty_string("destination", &self.destination)?;
        validate_non_empty_string("auth", &self.auth)?;
        validate_positive_number("interval", self.interval, 1)?;
        validate_positive_number("kick", self.kick, 1)?;
        Ok(())
    }
}
