//! Errors raised while loading review models.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors returned when constructing or loading a review model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A coefficient referenced a feature that does not exist.
    #[error("unknown feature `{name}` in model coefficients")]
    UnknownFeature {
        /// Name found in the coefficient file.
        name: String,
    },
    /// A coefficient or the intercept was not finite.
    #[error("coefficient for `{term}` must be finite, got {value}")]
    InvalidCoefficient {
        /// Feature name, or `intercept`.
        term: String,
        /// Offending value.
        value: f64,
    },
    /// Opening the model file failed.
    #[error("failed to open model file at {path}")]
    Open {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: std::io::Error,
    },
    /// Decoding the model file failed.
    #[error("failed to decode model file at {path}")]
    Decode {
        /// Path to the model file.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}
