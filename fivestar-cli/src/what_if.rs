//! `what-if` command: predicted effect of changing a listing's offering.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use fivestar_core::{
    AttributeOverrides, ClusterTable, ReviewPredictor, WhatIfOutcome, analyse_what_if, stars,
};
use fivestar_model::load_linear_model;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetConfig, require_existing};
use crate::{ARG_LISTING_ID, ARG_LISTINGS, ARG_THRESHOLDS, CliError, write_json};

pub(crate) const ARG_MODEL: &str = "model";
pub(crate) const ENV_WHAT_IF_LISTINGS: &str = "FIVESTAR_CMDS_WHAT_IF_LISTINGS";
pub(crate) const ENV_WHAT_IF_LISTING_ID: &str = "FIVESTAR_CMDS_WHAT_IF_LISTING_ID";
pub(crate) const ENV_WHAT_IF_MODEL: &str = "FIVESTAR_CMDS_WHAT_IF_MODEL";

/// CLI arguments for the `what-if` command.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "what-if",
    about = "Predict how attribute changes move a listing's score and rank",
    long_about = "Apply hypothetical changes to a listing, predict its review \
                 score before and after with a linear model, and rank both \
                 predictions among the observed scores of its segment."
)]
#[ortho_config(prefix = "FIVESTAR")]
pub(crate) struct WhatIfArgs {
    /// Listing to analyse.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) listing_id: Option<u64>,
    /// Path to the JSON model coefficients.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// New nightly price.
    #[arg(long, value_name = "amount")]
    #[serde(default)]
    pub(crate) price: Option<f64>,
    /// New cleanliness sub-score.
    #[arg(long, value_name = "score")]
    #[serde(default)]
    pub(crate) cleanliness: Option<f64>,
    /// Offer (`true`) or withdraw (`false`) wifi.
    #[arg(long, value_name = "bool")]
    #[serde(default)]
    pub(crate) wifi: Option<bool>,
    /// Offer or withdraw breakfast.
    #[arg(long, value_name = "bool")]
    #[serde(default)]
    pub(crate) breakfast: Option<bool>,
    /// Switch to or away from a strict cancellation policy.
    #[arg(long, value_name = "bool")]
    #[serde(default)]
    pub(crate) strict_cancellation: Option<bool>,
    /// Enable or disable instant booking.
    #[arg(long, value_name = "bool")]
    #[serde(default)]
    pub(crate) instant_bookable: Option<bool>,
    /// Path to the listing export (JSON, or CSV with a `.csv` extension).
    #[arg(long = ARG_LISTINGS, value_name = "path")]
    #[serde(default)]
    pub(crate) listings: Option<Utf8PathBuf>,
    /// Path to fixed per-location price deciles.
    #[arg(long = ARG_THRESHOLDS, value_name = "path")]
    #[serde(default)]
    pub(crate) thresholds: Option<Utf8PathBuf>,
}

impl WhatIfArgs {
    pub(crate) fn into_config(self) -> Result<WhatIfConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        WhatIfConfig::try_from(merged)
    }
}

/// Resolved `what-if` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WhatIfConfig {
    pub(crate) listing_id: u64,
    pub(crate) model: Utf8PathBuf,
    pub(crate) overrides: AttributeOverrides,
    pub(crate) dataset: DatasetConfig,
}

impl TryFrom<WhatIfArgs> for WhatIfConfig {
    type Error = CliError;

    fn try_from(args: WhatIfArgs) -> Result<Self, Self::Error> {
        let listing_id = args.listing_id.ok_or(CliError::MissingArgument {
            field: ARG_LISTING_ID,
            env: ENV_WHAT_IF_LISTING_ID,
        })?;
        let model = args.model.ok_or(CliError::MissingArgument {
            field: ARG_MODEL,
            env: ENV_WHAT_IF_MODEL,
        })?;
        let dataset =
            DatasetConfig::resolve(args.listings, args.thresholds, ENV_WHAT_IF_LISTINGS)?;
        Ok(Self {
            listing_id,
            model,
            overrides: AttributeOverrides {
                price: args.price,
                cleanliness: args.cleanliness,
                wifi: args.wifi,
                breakfast: args.breakfast,
                strict_cancellation: args.strict_cancellation,
                instant_bookable: args.instant_bookable,
            },
            dataset,
        })
    }
}

/// Printed by the `what-if` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WhatIfReport {
    #[serde(flatten)]
    pub(crate) outcome: WhatIfOutcome,
    pub(crate) baseline_stars: f64,
    pub(crate) adjusted_stars: f64,
}

pub(crate) fn what_if_report<P: ReviewPredictor>(
    table: &ClusterTable,
    config: &WhatIfConfig,
    predictor: &P,
) -> Result<WhatIfReport, CliError> {
    if config.overrides.is_empty() {
        debug!("no overrides given for listing {}", config.listing_id);
    }
    let outcome = analyse_what_if(config.listing_id, &config.overrides, predictor, table)?;
    Ok(WhatIfReport {
        baseline_stars: stars(outcome.baseline_prediction),
        adjusted_stars: stars(outcome.adjusted_prediction),
        outcome,
    })
}

pub(crate) fn run_what_if(args: WhatIfArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.model, ARG_MODEL)?;
    let model = load_linear_model(&config.model)?;
    let table = config.dataset.load_table()?;
    write_json(writer, &what_if_report(&table, &config, &model)?)
}
