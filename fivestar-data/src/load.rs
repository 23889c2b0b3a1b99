//! Loaders for listing exports (JSON or CSV) and price threshold tables.

use std::io::BufReader;

use camino::Utf8Path;
use fivestar_core::{ListingRecord, PriceThresholdTable};
use log::debug;
use serde::de::DeserializeOwned;

use crate::{DatasetError, RawListing, filter_reviewed, fs::open_utf8_file};

fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, DatasetError> {
    let file = open_utf8_file(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_csv(path: &Utf8Path) -> Result<Vec<RawListing>, DatasetError> {
    let file = open_utf8_file(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    csv::Reader::from_reader(BufReader::new(file))
        .into_deserialize()
        .collect::<Result<Vec<RawListing>, _>>()
        .map_err(|source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

/// Encoding of a listing export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFormat {
    /// A JSON array of rows.
    Json,
    /// A headed CSV file such as the scraped `listings.csv`; unused columns
    /// are ignored.
    Csv,
}

impl ListingFormat {
    /// Infer the format from the extension: `.csv` is CSV, anything else JSON.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(extension) if extension.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Read raw rows without filtering, choosing the reader by extension.
///
/// # Errors
/// Returns [`DatasetError::Open`], and [`DatasetError::Parse`] or
/// [`DatasetError::Csv`] for undecodable content.
pub fn load_raw_listings(path: &Utf8Path) -> Result<Vec<RawListing>, DatasetError> {
    match ListingFormat::from_path(path) {
        ListingFormat::Json => read_json(path),
        ListingFormat::Csv => read_csv(path),
    }
}

/// Read, filter and decode the listings in a JSON or CSV export.
///
/// Rows without a review score or with too few reviews are dropped; every
/// other row becomes a [`ListingRecord`].
///
/// # Errors
/// As for [`load_raw_listings`].
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use fivestar_data::load_listings;
///
/// # fn main() -> Result<(), fivestar_data::DatasetError> {
/// let listings = load_listings(Utf8Path::new("listings.json"))?;
/// println!("{} listings", listings.len());
/// # Ok(())
/// # }
/// ```
pub fn load_listings(path: &Utf8Path) -> Result<Vec<ListingRecord>, DatasetError> {
    let outcome = filter_reviewed(load_raw_listings(path)?);
    debug!(
        "loaded {} listings from {path} ({} dropped)",
        outcome.kept.len(),
        outcome.dropped
    );
    Ok(outcome
        .kept
        .into_iter()
        .map(RawListing::into_record)
        .collect())
}

/// Read fixed per-location deciles, e.g. `{"Hackney": [40, 60, ...]}`.
///
/// # Errors
/// Returns [`DatasetError::Parse`] when a location does not carry nine
/// finite, non-decreasing points.
pub fn load_thresholds(path: &Utf8Path) -> Result<PriceThresholdTable, DatasetError> {
    let table: PriceThresholdTable = read_json(path)?;
    debug!("loaded thresholds for {} locations from {path}", table.len());
    Ok(table)
}
