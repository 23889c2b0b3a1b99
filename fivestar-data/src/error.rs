//! Errors raised while reading and writing listing data.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors returned by the loaders and the artefact writer.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Opening an input file failed.
    #[error("failed to open {path}")]
    Open {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: std::io::Error,
    },
    /// An input file did not hold the expected JSON document.
    #[error("failed to parse {path}")]
    Parse {
        /// Path of the malformed file.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A CSV listing export could not be read or a row could not be decoded.
    #[error("failed to read CSV {path}")]
    Csv {
        /// Path of the export.
        path: Utf8PathBuf,
        /// Source error from `csv`, carrying the offending record position.
        #[source]
        source: csv::Error,
    },
    /// Creating the parent directory for an output file failed.
    #[error("failed to create parent directory {path}")]
    CreateParent {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: std::io::Error,
    },
    /// Creating an output file failed.
    #[error("failed to write {path}")]
    WriteFile {
        /// Output path.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: std::io::Error,
    },
    /// Serialising an output document failed.
    #[error("failed to serialise {path}")]
    Serialise {
        /// Output path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}
