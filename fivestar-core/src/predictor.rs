//! Review score prediction seam and the what-if analysis built on it.

use serde::{Deserialize, Serialize};

use crate::{
    AttributeOverrides, ClusterTable, ListingAttributes, SegmentError, rank_score_in,
    with_overrides,
};

/// Highest possible review score.
pub const MAX_REVIEW_SCORE: f64 = 100.0;

/// Predict a listing's overall review score from its attributes.
///
/// Implementations must be thread-safe so one model can serve concurrent
/// queries. Predictions are on the 0 to 100 review scale; use
/// [`ReviewPredictor::sanitise`] to enforce that.
///
/// # Examples
///
/// ```rust
/// use fivestar_core::{ListingAttributes, ReviewPredictor};
///
/// struct Optimist;
///
/// impl ReviewPredictor for Optimist {
///     fn predict(&self, _attributes: &ListingAttributes) -> f64 {
///         Self::sanitise(120.0)
///     }
/// }
/// ```
pub trait ReviewPredictor: Send + Sync {
    /// Predicted review score for `attributes`.
    fn predict(&self, attributes: &ListingAttributes) -> f64;

    /// Returns `0.0` for non-finite values and clamps to `0.0..=100.0`.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, MAX_REVIEW_SCORE)
    }
}

/// Convert a 0 to 100 review score to stars, rounded to one decimal.
///
/// ```
/// assert_eq!(fivestar_core::stars(93.0), 4.7);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "stars are a scaled score")]
pub fn stars(score: f64) -> f64 {
    (score / 2.0).round() / 10.0
}

#[expect(clippy::float_arithmetic, reason = "star deltas keep two decimals")]
fn star_delta(score_delta: f64) -> f64 {
    (score_delta * 5.0).round() / 100.0
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "percentiles lie in 0..=1 so the point change fits in i64"
)]
fn rank_change_points(baseline: f64, adjusted: f64) -> i64 {
    (baseline * 100.0 - adjusted * 100.0).round() as i64
}

/// Effect of hypothetical attribute changes on a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfOutcome {
    /// Listing analysed.
    pub listing_id: u64,
    /// Prediction for the listing as it is.
    pub baseline_prediction: f64,
    /// Prediction with the overrides applied.
    pub adjusted_prediction: f64,
    /// `adjusted_prediction - baseline_prediction`.
    pub score_delta: f64,
    /// Score delta in stars, two decimals.
    pub star_delta: f64,
    /// Observed score shifted by the delta, kept within 0 to 100.
    pub projected_score: f64,
    /// Percentile of the baseline prediction among the segment's scores.
    pub baseline_rank: f64,
    /// Percentile of the adjusted prediction among the segment's scores.
    pub adjusted_rank: f64,
    /// Improvement in whole percentage points; positive moves up.
    pub rank_change_points: i64,
}

/// Predict how overrides change a listing's score and standing.
///
/// Both predictions are ranked against the observed scores of the listing's
/// segment, so model bias cancels out of the rank change.
///
/// # Errors
/// Returns [`SegmentError::NotFound`] for an unknown id and
/// [`SegmentError::EmptySegment`] when the listing has no peers.
#[expect(clippy::float_arithmetic, reason = "deltas are differences of scores")]
pub fn analyse_what_if<P>(
    listing_id: u64,
    overrides: &AttributeOverrides,
    predictor: &P,
    table: &ClusterTable,
) -> Result<WhatIfOutcome, SegmentError>
where
    P: ReviewPredictor,
{
    let entry = table.lookup_by_listing_id(listing_id)?;
    let members = table.lookup_by_segment(&entry.segment);
    let empty = || SegmentError::EmptySegment {
        key: entry.segment.clone(),
    };
    if members.len() < 2 {
        return Err(empty());
    }
    let scores: Vec<f64> = members.iter().map(|member| member.review_score).collect();

    let baseline_prediction = P::sanitise(predictor.predict(&entry.attributes));
    let adjusted = with_overrides(&entry.attributes, overrides);
    let adjusted_prediction = P::sanitise(predictor.predict(&adjusted));
    let score_delta = adjusted_prediction - baseline_prediction;
    let baseline_rank = rank_score_in(&scores, baseline_prediction).ok_or_else(empty)?;
    let adjusted_rank = rank_score_in(&scores, adjusted_prediction).ok_or_else(empty)?;

    Ok(WhatIfOutcome {
        listing_id,
        baseline_prediction,
        adjusted_prediction,
        score_delta,
        star_delta: star_delta(score_delta),
        projected_score: (entry.review_score + score_delta).clamp(0.0, MAX_REVIEW_SCORE),
        baseline_rank,
        adjusted_rank,
        rank_change_points: rank_change_points(baseline_rank, adjusted_rank),
    })
}
