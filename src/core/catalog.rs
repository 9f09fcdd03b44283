use crate::domain::model::CatalogEntry;
use crate::utils::error::{FerryError, Result};
use serde::Deserialize;
use std::path::Path;

/// The consumed columns of the tab-delimited catalog. Extra columns are
/// ignored by serde.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Content ID")]
    content_id: String,
    #[serde(rename = "PKG direct link")]
    direct_link: String,
}

fn parse_catalog<R: std::io::Read>(reader: R, dest_root: &str) -> Result<Vec<CatalogEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    let mut entries = Vec::new();
    for row in rdr.deserialize::<RawRow>() {
        let row = row?;
        entries.push(CatalogEntry::new(
            row.name,
            row.region,
            row.content_id,
            row.direct_link,
            dest_root,
        ));
    }

    tracing::debug!("Parsed {} catalog entries", entries.len());
    Ok(entries)
}

/// Read a catalog from a local TSV file, rows in file order.
pub fn read_catalog(path: &Path, dest_root: &str) -> Result<Vec<CatalogEntry>> {
    let file = std::fs::File::open(path)?;
    parse_catalog(file, dest_root)
}

/// The remote-fetch alternative: download the TSV and parse the body.
pub async fn fetch_catalog(
    client: &reqwest::Client,
    url: &str,
    dest_root: &str,
) -> Result<Vec<CatalogEntry>> {
    tracing::info!("Fetching catalog from {}", url);
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FerryError::CatalogError {
            message: format!("catalog fetch returned {}", response.status()),
        });
    }

    let body = response.text().await?;
    parse_catalog(body.as_bytes(), dest_root)
}
