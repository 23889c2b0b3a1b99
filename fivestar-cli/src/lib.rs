//! Command-line interface for FiveStar's segment queries.
//!
//! Every command loads a listing export, segments it and prints a JSON
//! report on stdout. Inputs can come from CLI flags, configuration files or
//! `FIVESTAR_CMDS_<COMMAND>_<FIELD>` environment variables.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod averages;
mod cluster;
mod coords;
mod dataset;
mod error;
mod rank;
mod segment;
mod top;
mod what_if;

pub use error::CliError;

use averages::AveragesArgs;
use cluster::ClusterArgs;
use coords::CoordsArgs;
use rank::RankArgs;
use segment::SegmentArgs;
use top::TopArgs;
use what_if::WhatIfArgs;

const ARG_LISTINGS: &str = "listings";
const ARG_THRESHOLDS: &str = "thresholds";
const ARG_LISTING_ID: &str = "listing-id";
const ARG_SEGMENT: &str = "segment";

/// Run the FiveStar CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Segment(args) => segment::run_segment(args, writer),
        Command::Rank(args) => rank::run_rank(args, writer),
        Command::Averages(args) => averages::run_averages(args, writer),
        Command::Top(args) => top::run_top(args, writer),
        Command::Coords(args) => coords::run_coords(args, writer),
        Command::WhatIf(args) => what_if::run_what_if(args, writer),
        Command::Cluster(args) => cluster::run_cluster(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fivestar",
    about = "Segment rental listings and rank them against their peers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the segment a listing belongs to.
    Segment(SegmentArgs),
    /// Rank a listing's review score within its segment.
    Rank(RankArgs),
    /// Summarise a segment.
    Averages(AveragesArgs),
    /// List the best-reviewed listings of a segment.
    Top(TopArgs),
    /// Locate the members of the segment matching raw listing fields.
    Coords(CoordsArgs),
    /// Predict how attribute changes move a listing's score and rank.
    WhatIf(WhatIfArgs),
    /// Persist every listing's segment assignment.
    Cluster(ClusterArgs),
}

/// Write `report` as pretty JSON followed by a newline.
fn write_json<T: Serialize>(writer: &mut dyn Write, report: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
