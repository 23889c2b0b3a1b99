//! Core segmentation and peer-ranking engine for FiveStar.
//!
//! Listings are partitioned into segments keyed by location, a price band
//! relative to that location's own price deciles, and a property size band.
//! A [`ClusterTable`] built once from loaded listings answers segment
//! lookups; ranking, statistics and top-listing queries run against it
//! without mutation. Review models plug in through [`ReviewPredictor`].
#![forbid(unsafe_code)]

mod error;
mod features;
mod listing;
mod numeric;
mod predictor;
mod price;
mod property;
mod queries;
mod ranking;
mod segment;
mod stats;
mod table;
mod top;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::SegmentError;
pub use features::{DERIVED_FEATURES, DerivedFeature, feature, feature_vector};
pub use listing::{
    AttributeOverrides, CancellationPolicy, ListingAttributes, ListingRecord, Offering,
    with_overrides,
};
pub use predictor::{MAX_REVIEW_SCORE, ReviewPredictor, WhatIfOutcome, analyse_what_if, stars};
pub use price::{
    PriceCategory, PriceThresholdTable, PriceThresholds, RawPrice, THRESHOLD_POINTS,
    categorize_price, parse_price,
};
pub use property::{ENTIRE_PLACE, SizeCategory, categorize_property, is_entire_place};
pub use queries::SegmentQueries;
pub use ranking::{
    HypotheticalMode, SegmentRank, min_rank, rank, rank_hypothetical, rank_score_in,
};
pub use segment::{SegmentKey, segment_key_for};
pub use stats::{SegmentStatistics, segment_statistics};
pub use table::{ClusterEntry, ClusterTable, SegmentSummary, SharedClusterTable};
pub use top::{DEFAULT_TOP_FRACTION, top_fraction};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_send_sync<T: Send + Sync>() {}

    #[rstest]
    fn shared_types_cross_threads() {
        assert_send_sync::<ClusterTable>();
        assert_send_sync::<SharedClusterTable>();
        assert_send_sync::<SegmentError>();
    }
}
