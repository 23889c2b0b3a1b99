//! `averages` command: statistics of one segment.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use fivestar_core::{SegmentKey, SegmentQueries};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetConfig;
use crate::{ARG_LISTINGS, ARG_SEGMENT, ARG_THRESHOLDS, CliError, write_json};

pub(crate) const ENV_AVERAGES_LISTINGS: &str = "FIVESTAR_CMDS_AVERAGES_LISTINGS";
pub(crate) const ENV_AVERAGES_SEGMENT: &str = "FIVESTAR_CMDS_AVERAGES_SEGMENT";

/// CLI arguments for the `averages` command.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "averages",
    about = "Summarise a segment",
    long_about = "Report the mean review score, cleanliness and price of a \
                 segment and the share of members offering wifi, \
                 breakfast, strict cancellation and instant booking. \
                 Segments are written as L:<location>_P:<price>_S:<size>."
)]
#[ortho_config(prefix = "FIVESTAR")]
pub(crate) struct AveragesArgs {
    /// Segment label, e.g. `L:Hackney_P:cheap_S:room`.
    #[arg(value_name = "segment")]
    #[serde(default)]
    pub(crate) segment: Option<String>,
    /// Path to the listing export (JSON, or CSV with a `.csv` extension).
    #[arg(long = ARG_LISTINGS, value_name = "path")]
    #[serde(default)]
    pub(crate) listings: Option<Utf8PathBuf>,
    /// Path to fixed per-location price deciles.
    #[arg(long = ARG_THRESHOLDS, value_name = "path")]
    #[serde(default)]
    pub(crate) thresholds: Option<Utf8PathBuf>,
}

impl AveragesArgs {
    pub(crate) fn into_config(self) -> Result<AveragesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AveragesConfig::try_from(merged)
    }
}

/// Resolved `averages` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AveragesConfig {
    pub(crate) segment: SegmentKey,
    pub(crate) dataset: DatasetConfig,
}

impl TryFrom<AveragesArgs> for AveragesConfig {
    type Error = CliError;

    fn try_from(args: AveragesArgs) -> Result<Self, Self::Error> {
        let label = args.segment.ok_or(CliError::MissingArgument {
            field: ARG_SEGMENT,
            env: ENV_AVERAGES_SEGMENT,
        })?;
        let segment = label.parse::<SegmentKey>()?;
        let dataset =
            DatasetConfig::resolve(args.listings, args.thresholds, ENV_AVERAGES_LISTINGS)?;
        Ok(Self { segment, dataset })
    }
}

pub(crate) fn run_averages(args: AveragesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let table = config.dataset.load_table()?;
    let statistics = SegmentQueries::new(&table).segment_averages(&config.segment)?;
    write_json(writer, &statistics)
}
