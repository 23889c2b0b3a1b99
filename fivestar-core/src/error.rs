//! Errors raised while segmenting, ranking and looking up listings.
#![forbid(unsafe_code)]

use thiserror::Error;

use crate::SegmentKey;

/// Errors raised by categorization, cluster table construction and queries.
///
/// Categorization helpers fail fast, [`ClusterTable::build`] is
/// all-or-nothing, and query operations surface `NotFound` or
/// `EmptySegment` instead of returning sentinel values.
///
/// [`ClusterTable::build`]: crate::ClusterTable::build
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentError {
    /// A formatted price string could not be parsed into an amount.
    #[error("failed to parse price {raw:?}")]
    PriceParse {
        /// Text received from the data source.
        raw: String,
    },
    /// A price was negative or not finite.
    #[error("price {price} must be a finite, non-negative amount")]
    InvalidPrice {
        /// Offending amount.
        price: f64,
    },
    /// Percentile thresholds were malformed or could not be derived.
    #[error("invalid price thresholds: {reason}")]
    InvalidThresholds {
        /// Description of the defect.
        reason: String,
    },
    /// A required field was null or missing and no default applies.
    #[error("missing required attribute `{field}`")]
    MissingAttribute {
        /// Name of the missing field.
        field: &'static str,
    },
    /// A review score was not finite or fell outside `0..=100`.
    #[error("review score {score} must lie within 0..=100")]
    InvalidScore {
        /// Offending score.
        score: f64,
    },
    /// A listing row was rejected while building the cluster table.
    #[error("listing {listing_id} rejected: {reason}")]
    InvalidDataset {
        /// Identifier of the rejected listing.
        listing_id: u64,
        /// Why the row was rejected.
        reason: String,
    },
    /// No price thresholds are known for a location.
    #[error("no price thresholds for location {location:?}")]
    UnknownLocation {
        /// Requested location.
        location: String,
    },
    /// A listing id is absent from the cluster table or the queried segment.
    #[error("listing {listing_id} not found")]
    NotFound {
        /// Requested listing identifier.
        listing_id: u64,
    },
    /// A segment has no comparable members for the requested operation.
    #[error("segment {key} has no comparable listings")]
    EmptySegment {
        /// Segment that was queried.
        key: SegmentKey,
    },
    /// A top-listing fraction was outside `0.0..=1.0`.
    #[error("fraction {fraction} must lie within 0.0..=1.0")]
    InvalidFraction {
        /// Requested fraction.
        fraction: f64,
    },
    /// A segment label could not be parsed.
    #[error("segment key {raw:?} is malformed")]
    InvalidSegmentKey {
        /// Label as supplied by the caller.
        raw: String,
    },
}
