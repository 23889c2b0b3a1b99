//! Listing inputs shared by every command.

use camino::{Utf8Path, Utf8PathBuf};
use fivestar_core::{ClusterTable, PriceThresholdTable};
use fivestar_data::fs::file_is_file;
use fivestar_data::{load_listings, load_thresholds};
use log::info;

use crate::{ARG_LISTINGS, ARG_THRESHOLDS, CliError};

/// Resolved listing and threshold inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DatasetConfig {
    /// Listing export, JSON or CSV.
    pub(crate) listings: Utf8PathBuf,
    /// Fixed per-location deciles; computed from the listings when absent.
    pub(crate) thresholds: Option<Utf8PathBuf>,
}

impl DatasetConfig {
    /// Build from merged arguments, reporting `listings_env` when the
    /// listings path is missing.
    pub(crate) fn resolve(
        listings: Option<Utf8PathBuf>,
        thresholds: Option<Utf8PathBuf>,
        listings_env: &'static str,
    ) -> Result<Self, CliError> {
        let listings = listings.ok_or(CliError::MissingArgument {
            field: ARG_LISTINGS,
            env: listings_env,
        })?;
        Ok(Self {
            listings,
            thresholds,
        })
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.listings, ARG_LISTINGS)?;
        if let Some(path) = &self.thresholds {
            require_existing(path, ARG_THRESHOLDS)?;
        }
        Ok(())
    }

    /// Load, filter and segment the listings.
    pub(crate) fn load_table(&self) -> Result<ClusterTable, CliError> {
        self.validate_sources()?;
        let listings = load_listings(&self.listings)?;
        let thresholds = match &self.thresholds {
            Some(path) => load_thresholds(path)?,
            None => PriceThresholdTable::from_listings(&listings)?,
        };
        let table = ClusterTable::build(&listings, &thresholds)?;
        info!(
            "segmented {} listings from {} into {} segments",
            table.len(),
            self.listings,
            table.segments().len()
        );
        Ok(table)
    }
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}
