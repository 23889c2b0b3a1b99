//! Best-reviewed listings of a segment.

use crate::numeric::rounded_count;
use crate::{ClusterTable, SegmentError, SegmentKey};

/// Fraction used when callers ask for "the top listings" without a size.
pub const DEFAULT_TOP_FRACTION: f64 = 0.25;

/// Ids of the best-reviewed `fraction` of a segment.
///
/// Listings are ordered by review score descending, equal scores by
/// ascending listing id, and `round(size * fraction)` ids are kept with
/// halves rounding up. An empty segment yields an empty vector.
///
/// # Errors
/// Returns [`SegmentError::InvalidFraction`] when `fraction` is not a finite
/// value within `0.0..=1.0`.
pub fn top_fraction(
    key: &SegmentKey,
    table: &ClusterTable,
    fraction: f64,
) -> Result<Vec<u64>, SegmentError> {
    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
        return Err(SegmentError::InvalidFraction { fraction });
    }
    let mut members = table.lookup_by_segment(key);
    members.sort_by(|a, b| {
        b.review_score
            .total_cmp(&a.review_score)
            .then(a.listing_id.cmp(&b.listing_id))
    });
    let keep = rounded_count(members.len(), fraction);
    Ok(members
        .into_iter()
        .take(keep)
        .map(|member| member.listing_id)
        .collect())
}
