//! `cluster` command: persist segment assignments for downstream tools.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use fivestar_data::write_cluster_assignments;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetConfig;
use crate::{ARG_LISTINGS, ARG_THRESHOLDS, CliError, write_json};

pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ENV_CLUSTER_LISTINGS: &str = "FIVESTAR_CMDS_CLUSTER_LISTINGS";
pub(crate) const DEFAULT_OUTPUT: &str = "clusters.json";

/// CLI arguments for the `cluster` command.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "cluster",
    about = "Persist every listing's segment assignment",
    long_about = "Segment the listing export and write each listing's \
                 segment label, position and review score, plus the \
                 segment index, to a JSON artefact."
)]
#[ortho_config(prefix = "FIVESTAR")]
pub(crate) struct ClusterArgs {
    /// Path to the listing export (JSON, or CSV with a `.csv` extension).
    #[arg(long = ARG_LISTINGS, value_name = "path")]
    #[serde(default)]
    pub(crate) listings: Option<Utf8PathBuf>,
    /// Path to fixed per-location price deciles.
    #[arg(long = ARG_THRESHOLDS, value_name = "path")]
    #[serde(default)]
    pub(crate) thresholds: Option<Utf8PathBuf>,
    /// Where to write the artefact (default `clusters.json`).
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ClusterArgs {
    pub(crate) fn into_config(self) -> Result<ClusterConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ClusterConfig::try_from(merged)
    }
}

/// Resolved `cluster` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClusterConfig {
    pub(crate) output: Utf8PathBuf,
    pub(crate) dataset: DatasetConfig,
}

impl TryFrom<ClusterArgs> for ClusterConfig {
    type Error = CliError;

    fn try_from(args: ClusterArgs) -> Result<Self, Self::Error> {
        let dataset =
            DatasetConfig::resolve(args.listings, args.thresholds, ENV_CLUSTER_LISTINGS)?;
        Ok(Self {
            output: args
                .output
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT)),
            dataset,
        })
    }
}

/// Printed by the `cluster` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ClusterReport {
    pub(crate) output: Utf8PathBuf,
    pub(crate) listings: usize,
    pub(crate) segments: usize,
}

pub(crate) fn run_cluster(args: ClusterArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let table = config.dataset.load_table()?;
    let artefact = write_cluster_assignments(&table, &config.output)?;
    write_json(
        writer,
        &ClusterReport {
            output: config.output,
            listings: artefact.assignments.len(),
            segments: artefact.segments.len(),
        },
    )
}
