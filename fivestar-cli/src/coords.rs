//! `coords` command: where the peers of a would-be listing are.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use fivestar_core::{ClusterTable, SegmentQueries};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetConfig;
use crate::{ARG_LISTINGS, ARG_THRESHOLDS, CliError, write_json};

pub(crate) const ARG_LOCATION: &str = "location";
pub(crate) const ARG_PRICE: &str = "price";
pub(crate) const ARG_PROPERTY_TYPE: &str = "property-type";
pub(crate) const ARG_BEDROOMS: &str = "bedrooms";
pub(crate) const ENV_COORDS_LISTINGS: &str = "FIVESTAR_CMDS_COORDS_LISTINGS";
pub(crate) const ENV_COORDS_LOCATION: &str = "FIVESTAR_CMDS_COORDS_LOCATION";
pub(crate) const ENV_COORDS_PRICE: &str = "FIVESTAR_CMDS_COORDS_PRICE";
pub(crate) const ENV_COORDS_PROPERTY_TYPE: &str = "FIVESTAR_CMDS_COORDS_PROPERTY_TYPE";

/// CLI arguments for the `coords` command.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "coords",
    about = "Locate the members of the segment matching raw listing fields",
    long_about = "Derive a segment from a location, nightly price, room type \
                 and bedroom count, then print the coordinates of every \
                 listing in it."
)]
#[ortho_config(prefix = "FIVESTAR")]
pub(crate) struct CoordsArgs {
    /// Neighbourhood of the listing.
    #[arg(long = ARG_LOCATION, value_name = "name")]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Nightly price.
    #[arg(long = ARG_PRICE, value_name = "amount")]
    #[serde(default)]
    pub(crate) price: Option<f64>,
    /// Room type, e.g. `Entire home/apt`.
    #[arg(long = ARG_PROPERTY_TYPE, value_name = "type")]
    #[serde(default)]
    pub(crate) property_type: Option<String>,
    /// Bedroom count; needed for entire places.
    #[arg(long = ARG_BEDROOMS, value_name = "count")]
    #[serde(default)]
    pub(crate) bedrooms: Option<f64>,
    /// Path to the listing export (JSON, or CSV with a `.csv` extension).
    #[arg(long = ARG_LISTINGS, value_name = "path")]
    #[serde(default)]
    pub(crate) listings: Option<Utf8PathBuf>,
    /// Path to fixed per-location price deciles.
    #[arg(long = ARG_THRESHOLDS, value_name = "path")]
    #[serde(default)]
    pub(crate) thresholds: Option<Utf8PathBuf>,
}

impl CoordsArgs {
    pub(crate) fn into_config(self) -> Result<CoordsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CoordsConfig::try_from(merged)
    }
}

/// Resolved `coords` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CoordsConfig {
    pub(crate) location: String,
    pub(crate) price: f64,
    pub(crate) property_type: String,
    pub(crate) bedrooms: Option<f64>,
    pub(crate) dataset: DatasetConfig,
}

impl TryFrom<CoordsArgs> for CoordsConfig {
    type Error = CliError;

    fn try_from(args: CoordsArgs) -> Result<Self, Self::Error> {
        let location = args.location.ok_or(CliError::MissingArgument {
            field: ARG_LOCATION,
            env: ENV_COORDS_LOCATION,
        })?;
        let price = args.price.ok_or(CliError::MissingArgument {
            field: ARG_PRICE,
            env: ENV_COORDS_PRICE,
        })?;
        let property_type = args.property_type.ok_or(CliError::MissingArgument {
            field: ARG_PROPERTY_TYPE,
            env: ENV_COORDS_PROPERTY_TYPE,
        })?;
        let dataset = DatasetConfig::resolve(args.listings, args.thresholds, ENV_COORDS_LISTINGS)?;
        Ok(Self {
            location,
            price,
            property_type,
            bedrooms: args.bedrooms,
            dataset,
        })
    }
}

/// A listing position in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct Position {
    pub(crate) longitude: f64,
    pub(crate) latitude: f64,
}

/// Printed by the `coords` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CoordsReport {
    pub(crate) segment: String,
    pub(crate) positions: Vec<Position>,
}

pub(crate) fn coords_report(
    table: &ClusterTable,
    config: &CoordsConfig,
) -> Result<CoordsReport, CliError> {
    let segment = table.segment_for(
        &config.location,
        config.price,
        &config.property_type,
        config.bedrooms,
    )?;
    let positions = SegmentQueries::new(table)
        .cluster_coordinates(
            &config.location,
            config.price,
            &config.property_type,
            config.bedrooms,
        )?
        .into_iter()
        .map(|coord| Position {
            longitude: coord.x,
            latitude: coord.y,
        })
        .collect();
    Ok(CoordsReport {
        segment: segment.to_string(),
        positions,
    })
}

pub(crate) fn run_coords(args: CoordsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let table = config.dataset.load_table()?;
    write_json(writer, &coords_report(&table, &config)?)
}
