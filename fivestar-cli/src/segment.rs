//! `segment` command: the segment a listing belongs to, with its location
//! overview.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use fivestar_core::{ClusterTable, PriceCategory, SegmentQueries, SizeCategory};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetConfig;
use crate::{ARG_LISTING_ID, ARG_LISTINGS, ARG_THRESHOLDS, CliError, write_json};

pub(crate) const ENV_SEGMENT_LISTINGS: &str = "FIVESTAR_CMDS_SEGMENT_LISTINGS";
pub(crate) const ENV_SEGMENT_LISTING_ID: &str = "FIVESTAR_CMDS_SEGMENT_LISTING_ID";

/// CLI arguments for the `segment` command.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "segment",
    about = "Show the segment a listing belongs to",
    long_about = "Look up the segment of a listing together with its price \
                 band label and the median price of its location."
)]
#[ortho_config(prefix = "FIVESTAR")]
pub(crate) struct SegmentArgs {
    /// Listing to look up.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) listing_id: Option<u64>,
    /// Path to the listing export (JSON, or CSV with a `.csv` extension).
    #[arg(long = ARG_LISTINGS, value_name = "path")]
    #[serde(default)]
    pub(crate) listings: Option<Utf8PathBuf>,
    /// Path to fixed per-location price deciles.
    #[arg(long = ARG_THRESHOLDS, value_name = "path")]
    #[serde(default)]
    pub(crate) thresholds: Option<Utf8PathBuf>,
}

impl SegmentArgs {
    pub(crate) fn into_config(self) -> Result<SegmentConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SegmentConfig::try_from(merged)
    }
}

/// Resolved `segment` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SegmentConfig {
    pub(crate) listing_id: u64,
    pub(crate) dataset: DatasetConfig,
}

impl TryFrom<SegmentArgs> for SegmentConfig {
    type Error = CliError;

    fn try_from(args: SegmentArgs) -> Result<Self, Self::Error> {
        let listing_id = args.listing_id.ok_or(CliError::MissingArgument {
            field: ARG_LISTING_ID,
            env: ENV_SEGMENT_LISTING_ID,
        })?;
        let dataset =
            DatasetConfig::resolve(args.listings, args.thresholds, ENV_SEGMENT_LISTINGS)?;
        Ok(Self {
            listing_id,
            dataset,
        })
    }
}

/// Printed by the `segment` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SegmentReport {
    pub(crate) listing_id: u64,
    pub(crate) segment: String,
    pub(crate) cluster_id: Option<usize>,
    pub(crate) segment_size: usize,
    pub(crate) location: String,
    pub(crate) price_category: PriceCategory,
    pub(crate) price_label: String,
    pub(crate) size_category: SizeCategory,
    pub(crate) location_median_price: f64,
}

pub(crate) fn segment_report(
    table: &ClusterTable,
    listing_id: u64,
) -> Result<SegmentReport, CliError> {
    let queries = SegmentQueries::new(table);
    let key = queries.listing_to_segment(listing_id)?;
    let summary = table
        .segments()
        .into_iter()
        .find(|summary| summary.segment == key);
    let location_median_price = queries.location_median_price(key.location())?;
    Ok(SegmentReport {
        listing_id,
        segment: key.to_string(),
        cluster_id: summary.as_ref().map(|summary| summary.cluster_id),
        segment_size: summary.map_or(0, |summary| summary.listings),
        location: key.location().to_owned(),
        price_category: key.price_category(),
        price_label: key.price_category().label().to_owned(),
        size_category: key.size_category(),
        location_median_price,
    })
}

pub(crate) fn run_segment(args: SegmentArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let table = config.dataset.load_table()?;
    write_json(writer, &segment_report(&table, config.listing_id)?)
}
