//! Facade crate for the FiveStar segment engine.
//!
//! This crate re-exports the core segmentation, ranking and query API and
//! exposes the linear review model behind a feature flag.

#![forbid(unsafe_code)]

pub use fivestar_core::{
    AttributeOverrides, CancellationPolicy, ClusterEntry, ClusterTable, DEFAULT_TOP_FRACTION,
    HypotheticalMode, ListingAttributes, ListingRecord, Offering, PriceCategory,
    PriceThresholdTable, PriceThresholds, RawPrice, ReviewPredictor, SegmentError, SegmentKey,
    SegmentQueries, SegmentRank, SegmentStatistics, SegmentSummary, SharedClusterTable,
    SizeCategory, WhatIfOutcome, analyse_what_if, categorize_price, categorize_property,
    parse_price, rank, rank_hypothetical, segment_statistics, stars, top_fraction, with_overrides,
};

#[cfg(feature = "model-linear")]
pub use fivestar_model::{LinearModelSpec, LinearReviewModel, ModelError, load_linear_model};
