//! `rank` command: a listing's standing among its segment peers.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use fivestar_core::{ClusterTable, HypotheticalMode, SegmentRank, rank, rank_hypothetical};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetConfig;
use crate::{ARG_LISTING_ID, ARG_LISTINGS, ARG_THRESHOLDS, CliError, write_json};

pub(crate) const ARG_HYPOTHETICAL_SCORE: &str = "hypothetical-score";
pub(crate) const ARG_ALONGSIDE: &str = "alongside";
pub(crate) const ENV_RANK_LISTINGS: &str = "FIVESTAR_CMDS_RANK_LISTINGS";
pub(crate) const ENV_RANK_LISTING_ID: &str = "FIVESTAR_CMDS_RANK_LISTING_ID";

/// CLI arguments for the `rank` command.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "rank",
    about = "Rank a listing's review score within its segment",
    long_about = "Report the percentile rank and segment mean of a listing. \
                 With --hypothetical-score the listing is ranked as if it \
                 had that score instead, or in addition with --alongside."
)]
#[ortho_config(prefix = "FIVESTAR")]
pub(crate) struct RankArgs {
    /// Listing to rank.
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
    /// Rank this review score instead of the observed one.
    #[arg(long = ARG_HYPOTHETICAL_SCORE, value_name = "score")]
    #[serde(default)]
    pub(crate) hypothetical_score: Option<f64>,
    /// Keep the observed score as a peer of the hypothetical one.
    #[arg(long = ARG_ALONGSIDE, action = ArgAction::SetTrue, requires = "hypothetical_score")]
    #[serde(default)]
    pub(crate) alongside: bool,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    pub(crate) listing_id: u64,
    pub(crate) hypothetical: Option<(f64, HypotheticalMode)>,
    pub(crate) dataset: DatasetConfig,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let listing_id = args.listing_id.ok_or(CliError::MissingArgument {
            field: ARG_LISTING_ID,
            env: ENV_RANK_LISTING_ID,
        })?;
        let mode = if args.alongside {
            HypotheticalMode::Alongside
        } else {
            HypotheticalMode::Replace
        };
        let dataset = DatasetConfig::resolve(args.listings, args.thresholds, ENV_RANK_LISTINGS)?;
        Ok(Self {
            listing_id,
            hypothetical: args.hypothetical_score.map(|score| (score, mode)),
            dataset,
        })
    }
}

/// Printed by the `rank` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RankReport {
    pub(crate) listing_id: u64,
    pub(crate) segment: String,
    pub(crate) hypothetical_score: Option<f64>,
    #[serde(flatten)]
    pub(crate) standing: SegmentRank,
}

pub(crate) fn rank_report(table: &ClusterTable, config: &RankConfig) -> Result<RankReport, CliError> {
    let segment = table.segment_of(config.listing_id)?.to_string();
    let standing = match config.hypothetical {
        Some((score, mode)) => rank_hypothetical(config.listing_id, score, mode, table)?,
        None => rank(config.listing_id, table)?,
    };
    Ok(RankReport {
        listing_id: config.listing_id,
        segment,
        hypothetical_score: config.hypothetical.map(|(score, _)| score),
        standing,
    })
}

pub(crate) fn run_rank(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let table = config.dataset.load_table()?;
    write_json(writer, &rank_report(&table, &config)?)
}
