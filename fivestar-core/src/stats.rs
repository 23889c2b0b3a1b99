//! Aggregate statistics over a segment's members.

use serde::{Deserialize, Serialize};

use crate::numeric::{mean, rounded_percentage};
use crate::{ClusterEntry, ClusterTable, SegmentError, SegmentKey};

/// Averages and attribute prevalence of one segment, computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentStatistics {
    /// The segment described.
    pub segment: SegmentKey,
    /// Number of member listings.
    pub listings: usize,
    /// Mean observed review score.
    pub mean_review_score: f64,
    /// Mean cleanliness over the members that report one.
    pub mean_cleanliness: Option<f64>,
    /// Mean nightly price.
    pub mean_price: f64,
    /// Share of members offering wifi, in whole percent.
    pub wifi_pct: u8,
    /// Share of members offering breakfast, in whole percent.
    pub breakfast_pct: u8,
    /// Share of members with a strict cancellation policy, in whole percent.
    pub strict_cancellation_pct: u8,
    /// Share of instantly bookable members, in whole percent.
    pub instant_bookable_pct: u8,
}

fn prevalence(members: &[&ClusterEntry], flag: impl Fn(&ClusterEntry) -> bool) -> u8 {
    let set = members.iter().filter(|member| flag(member)).count();
    rounded_percentage(set, members.len())
}

/// Compute statistics for a segment. Percentages round half-up.
///
/// # Errors
/// Returns [`SegmentError::EmptySegment`] when the segment has no members.
pub fn segment_statistics(
    key: &SegmentKey,
    table: &ClusterTable,
) -> Result<SegmentStatistics, SegmentError> {
    let members = table.lookup_by_segment(key);
    let empty = || SegmentError::EmptySegment { key: key.clone() };
    let mean_review_score = mean(members.iter().map(|m| m.review_score)).ok_or_else(empty)?;
    let mean_price = mean(members.iter().map(|m| m.attributes.price)).ok_or_else(empty)?;
    Ok(SegmentStatistics {
        segment: key.clone(),
        listings: members.len(),
        mean_review_score,
        mean_cleanliness: mean(members.iter().filter_map(|m| m.attributes.cleanliness)),
        mean_price,
        wifi_pct: prevalence(&members, |m| m.attributes.wifi),
        breakfast_pct: prevalence(&members, |m| m.attributes.breakfast),
        strict_cancellation_pct: prevalence(&members, |m| m.attributes.cancellation.is_strict()),
        instant_bookable_pct: prevalence(&members, |m| m.attributes.instant_bookable),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ListingBuilder;
    use crate::{CancellationPolicy, PriceCategory, SizeCategory};
    use rstest::rstest;

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "test compares floats with a tolerance")]
    fn aggregates_members() {
        let listings = vec![
            ListingBuilder::new(1)
                .score(Some(95.0))
                .wifi(true)
                .cleanliness(Some(10.0))
                .build(),
            ListingBuilder::new(2)
                .score(Some(85.0))
                .wifi(true)
                .breakfast(true)
                .build(),
            ListingBuilder::new(3)
                .score(Some(75.0))
                .cancellation(CancellationPolicy::Strict)
                .cleanliness(Some(8.0))
                .build(),
        ];
        let table = ClusterTable::from_listings(&listings).expect("table builds");
        let key = table.segment_of(1).expect("listing 1").clone();
        let stats = segment_statistics(&key, &table).expect("non-empty segment");
        assert_eq!(stats.listings, 3);
        assert!((stats.mean_review_score - 85.0).abs() < 1e-9);
        assert!((stats.mean_price - 80.0).abs() < 1e-9);
        assert_eq!(stats.mean_cleanliness, Some(9.0));
        assert_eq!(stats.wifi_pct, 67);
        assert_eq!(stats.breakfast_pct, 33);
        assert_eq!(stats.strict_cancellation_pct, 33);
        assert_eq!(stats.instant_bookable_pct, 0);
    }

    #[rstest]
    fn empty_segment_is_an_error() {
        let table = ClusterTable::from_listings(&[ListingBuilder::new(1).build()])
            .expect("table builds");
        let key = SegmentKey::build("Hackney", PriceCategory::Cheap, SizeCategory::Large)
            .expect("key");
        assert_eq!(
            segment_statistics(&key, &table),
            Err(SegmentError::EmptySegment { key })
        );
    }
}
