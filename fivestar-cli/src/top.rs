//! `top` command: best-reviewed listings of a segment.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use fivestar_core::{DEFAULT_TOP_FRACTION, SegmentKey, SegmentQueries};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetConfig;
use crate::{ARG_LISTINGS, ARG_SEGMENT, ARG_THRESHOLDS, CliError, write_json};

pub(crate) const ARG_FRACTION: &str = "fraction";
pub(crate) const ENV_TOP_LISTINGS: &str = "FIVESTAR_CMDS_TOP_LISTINGS";
pub(crate) const ENV_TOP_SEGMENT: &str = "FIVESTAR_CMDS_TOP_SEGMENT";

/// CLI arguments for the `top` command.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "top",
    about = "List the best-reviewed listings of a segment",
    long_about = "Print the ids of the best-reviewed share of a segment, \
                 best first. Without --fraction the top quartile is shown."
)]
#[ortho_config(prefix = "FIVESTAR")]
pub(crate) struct TopArgs {
    /// Segment label, e.g. `L:Hackney_P:cheap_S:room`.
    #[arg(value_name = "segment")]
    #[serde(default)]
    pub(crate) segment: Option<String>,
    /// Share of the segment to keep, between 0 and 1.
    #[arg(long = ARG_FRACTION, value_name = "fraction")]
    #[serde(default)]
    pub(crate) fraction: Option<f64>,
    /// Path to the listing export (JSON, or CSV with a `.csv` extension).
    #[arg(long = ARG_LISTINGS, value_name = "path")]
    #[serde(default)]
    pub(crate) listings: Option<Utf8PathBuf>,
    /// Path to fixed per-location price deciles.
    #[arg(long = ARG_THRESHOLDS, value_name = "path")]
    #[serde(default)]
    pub(crate) thresholds: Option<Utf8PathBuf>,
}

impl TopArgs {
    pub(crate) fn into_config(self) -> Result<TopConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TopConfig::try_from(merged)
    }
}

/// Resolved `top` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TopConfig {
    pub(crate) segment: SegmentKey,
    pub(crate) fraction: f64,
    pub(crate) dataset: DatasetConfig,
}

impl TryFrom<TopArgs> for TopConfig {
    type Error = CliError;

    fn try_from(args: TopArgs) -> Result<Self, Self::Error> {
        let label = args.segment.ok_or(CliError::MissingArgument {
            field: ARG_SEGMENT,
            env: ENV_TOP_SEGMENT,
        })?;
        let segment = label.parse::<SegmentKey>()?;
        let dataset = DatasetConfig::resolve(args.listings, args.thresholds, ENV_TOP_LISTINGS)?;
        Ok(Self {
            segment,
            fraction: args.fraction.unwrap_or(DEFAULT_TOP_FRACTION),
            dataset,
        })
    }
}

/// Printed by the `top` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TopReport {
    pub(crate) segment: String,
    pub(crate) fraction: f64,
    pub(crate) listing_ids: Vec<u64>,
}

pub(crate) fn run_top(args: TopArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let table = config.dataset.load_table()?;
    let listing_ids = SegmentQueries::new(&table).top_listings(&config.segment, config.fraction)?;
    write_json(
        writer,
        &TopReport {
            segment: config.segment.to_string(),
            fraction: config.fraction,
            listing_ids,
        },
    )
}
