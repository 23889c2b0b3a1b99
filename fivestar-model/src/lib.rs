//! Review-score models for FiveStar what-if analysis.
//!
//! Models implement [`fivestar_core::ReviewPredictor`] so the core never sees
//! how a prediction is made. [`LinearReviewModel`] weights the named derived
//! features of a listing and is loaded from a JSON coefficient file.
#![forbid(unsafe_code)]

mod error;
mod linear;

pub use error::ModelError;
pub use linear::{LinearModelSpec, LinearReviewModel, load_linear_model};

#[cfg(test)]
mod tests;
