//! Linear review-score model over the derived listing features.

use std::collections::BTreeMap;
use std::io::BufReader;

use camino::Utf8Path;
use fivestar_core::{DerivedFeature, ListingAttributes, ReviewPredictor, feature};
use fivestar_data::fs::open_utf8_file;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Serialised form of a linear model.
///
/// ```json
/// { "intercept": 62.0, "coefficients": { "wifi": 4.5, "cleanliness": 2.1 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearModelSpec {
    /// Score predicted when every feature is zero.
    pub intercept: f64,
    /// Weight per derived feature name.
    #[serde(default)]
    pub coefficients: BTreeMap<String, f64>,
}

/// Intercept plus weighted derived features, clamped to the review scale.
#[derive(Debug, Clone)]
pub struct LinearReviewModel {
    intercept: f64,
    terms: Vec<(&'static DerivedFeature, f64)>,
}

impl LinearReviewModel {
    /// Validate a serialised model and resolve its feature names.
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownFeature`] for an unrecognised name and
    /// [`ModelError::InvalidCoefficient`] for a non-finite weight.
    pub fn from_spec(spec: &LinearModelSpec) -> Result<Self, ModelError> {
        if !spec.intercept.is_finite() {
            return Err(ModelError::InvalidCoefficient {
                term: "intercept".to_owned(),
                value: spec.intercept,
            });
        }
        let terms = spec
            .coefficients
            .iter()
            .map(|(name, &weight)| {
                let derived = feature(name).ok_or_else(|| ModelError::UnknownFeature {
                    name: name.clone(),
                })?;
                if !weight.is_finite() {
                    return Err(ModelError::InvalidCoefficient {
                        term: name.clone(),
                        value: weight,
                    });
                }
                Ok((derived, weight))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            intercept: spec.intercept,
            terms,
        })
    }

    /// Names of the features the model uses.
    pub fn feature_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.terms.iter().map(|(derived, _)| derived.name)
    }
}

impl ReviewPredictor for LinearReviewModel {
    #[expect(
        clippy::float_arithmetic,
        reason = "linear prediction is a weighted sum"
    )]
    fn predict(&self, attributes: &ListingAttributes) -> f64 {
        let raw = self
            .terms
            .iter()
            .fold(self.intercept, |sum, (derived, weight)| {
                sum + weight * (derived.derive)(attributes)
            });
        Self::sanitise(raw)
    }
}

/// Load a [`LinearReviewModel`] from a JSON file.
///
/// # Errors
/// Returns [`ModelError::Open`] or [`ModelError::Decode`] for unreadable
/// files and propagates [`LinearReviewModel::from_spec`] failures.
pub fn load_linear_model(path: &Utf8Path) -> Result<LinearReviewModel, ModelError> {
    let file = open_utf8_file(path).map_err(|source| ModelError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let spec: LinearModelSpec =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ModelError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    let model = LinearReviewModel::from_spec(&spec)?;
    debug!(
        "loaded linear model from {path} with {} terms",
        model.terms.len()
    );
    Ok(model)
}
