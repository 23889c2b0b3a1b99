//! Error types emitted by the FiveStar CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use fivestar_core::SegmentError;
use fivestar_data::DatasetError;
use fivestar_model::ModelError;
use thiserror::Error;

/// Errors emitted by the FiveStar CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a regular file.
    #[error("{field} path {path:?} is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Loading listings or thresholds, or writing the artefact, failed.
    #[error(transparent)]
    Dataset(#[from] Box<DatasetError>),
    /// Loading the review model failed.
    #[error(transparent)]
    Model(#[from] Box<ModelError>),
    /// Segmentation, ranking or a query was rejected.
    #[error(transparent)]
    Segment(#[from] SegmentError),
    /// Serialising a command report failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<DatasetError> for CliError {
    fn from(err: DatasetError) -> Self {
        Self::Dataset(Box::new(err))
    }
}

impl From<ModelError> for CliError {
    fn from(err: ModelError) -> Self {
        Self::Model(Box::new(err))
    }
}
