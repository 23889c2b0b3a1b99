//! Percentile rank of a listing's review score among its segment peers.
//!
//! Scores are ranked descending with minimum rank on ties, so every listing
//! sharing the best score gets rank 1. The percentile is `rank / size`: lower
//! is better and the best listing in a segment of `N` scores `1 / N`.

use serde::{Deserialize, Serialize};

use crate::numeric::{count_as_f64, mean};
use crate::{ClusterEntry, ClusterTable, MAX_REVIEW_SCORE, SegmentError};

/// Where a listing stands within its segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentRank {
    /// `rank / segment_size`, within `[1 / N, 1]`.
    pub percentile: f64,
    /// One-based rank, shared by tied scores.
    pub rank: usize,
    /// Mean observed review score of the segment.
    pub segment_mean: f64,
    /// Number of scores ranked.
    pub segment_size: usize,
}

/// How a hypothetical score enters the segment distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypotheticalMode {
    /// Substitute the listing's observed score.
    #[default]
    Replace,
    /// Keep the observed score and add the hypothetical one as an extra member.
    Alongside,
}

/// One-based rank of `score` among `scores`, descending, minimum on ties.
#[must_use]
pub fn min_rank(scores: &[f64], score: f64) -> usize {
    scores
        .iter()
        .filter(|&&other| other > score)
        .count()
        .saturating_add(1)
}

#[expect(clippy::float_arithmetic, reason = "percentile is rank over size")]
fn percentile(rank: usize, size: usize) -> f64 {
    count_as_f64(rank) / count_as_f64(size)
}

fn segment_members(
    listing_id: u64,
    table: &ClusterTable,
) -> Result<(&ClusterEntry, Vec<&ClusterEntry>), SegmentError> {
    let entry = table.lookup_by_listing_id(listing_id)?;
    let members = table.lookup_by_segment(&entry.segment);
    if members.iter().all(|member| member.listing_id == listing_id) {
        return Err(SegmentError::EmptySegment {
            key: entry.segment.clone(),
        });
    }
    Ok((entry, members))
}

fn observed_mean(members: &[&ClusterEntry]) -> f64 {
    mean(members.iter().map(|member| member.review_score)).unwrap_or_default()
}

/// Rank a listing's observed score within its segment.
///
/// # Errors
/// Returns [`SegmentError::NotFound`] for an unknown id and
/// [`SegmentError::EmptySegment`] when the listing has no peers.
///
/// # Examples
/// ```
/// use fivestar_core::{ClusterTable, rank, test_support::ListingBuilder};
///
/// # fn main() -> Result<(), fivestar_core::SegmentError> {
/// let listings: Vec<_> = [95.0, 95.0, 90.0, 80.0, 70.0]
///     .into_iter()
///     .zip(1..)
///     .map(|(score, id)| ListingBuilder::new(id).score(Some(score)).build())
///     .collect();
/// let table = ClusterTable::from_listings(&listings)?;
/// let standing = rank(3, &table)?;
/// assert_eq!(standing.rank, 3);
/// assert!((standing.percentile - 0.6).abs() < 1e-9);
/// assert!((standing.segment_mean - 86.0).abs() < 1e-9);
/// # Ok(())
/// # }
/// ```
pub fn rank(listing_id: u64, table: &ClusterTable) -> Result<SegmentRank, SegmentError> {
    let (entry, members) = segment_members(listing_id, table)?;
    let scores: Vec<f64> = members.iter().map(|member| member.review_score).collect();
    let position = min_rank(&scores, entry.review_score);
    Ok(SegmentRank {
        percentile: percentile(position, scores.len()),
        rank: position,
        segment_mean: observed_mean(&members),
        segment_size: scores.len(),
    })
}

/// Rank a hypothetical score for a listing without touching the table.
///
/// `segment_mean` stays the mean of the observed scores.
///
/// # Errors
/// Returns [`SegmentError::InvalidScore`] when `score` is not finite or lies
/// outside the review scale, otherwise as for [`rank`].
pub fn rank_hypothetical(
    listing_id: u64,
    score: f64,
    mode: HypotheticalMode,
    table: &ClusterTable,
) -> Result<SegmentRank, SegmentError> {
    if !(0.0..=MAX_REVIEW_SCORE).contains(&score) {
        return Err(SegmentError::InvalidScore { score });
    }
    let (entry, members) = segment_members(listing_id, table)?;
    let mut scores: Vec<f64> = members
        .iter()
        .filter(|member| member.listing_id != listing_id)
        .map(|member| member.review_score)
        .collect();
    if mode == HypotheticalMode::Alongside {
        scores.push(entry.review_score);
    }
    scores.push(score);
    let position = min_rank(&scores, score);
    Ok(SegmentRank {
        percentile: percentile(position, scores.len()),
        rank: position,
        segment_mean: observed_mean(&members),
        segment_size: scores.len(),
    })
}

/// Percentile a score would take if it joined `scores` as one more member.
///
/// Returns `None` when `scores` is empty, because there is nothing to rank
/// against.
#[must_use]
pub fn rank_score_in(scores: &[f64], score: f64) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let size = scores.len().saturating_add(1);
    Some(percentile(min_rank(scores, score), size))
}
