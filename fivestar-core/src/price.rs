//! Location-relative price bands.
//!
//! Each location carries nine price deciles (10th to 90th percentile). The
//! deciles at indices 1, 3, 5 and 7 split prices into five ordered
//! [`PriceCategory`] bands; index 4 is the location median. Thresholds are
//! explicit values passed into every categorization call, so the same table
//! is reused for bucketing at build time and for lookups afterwards.
//!
//! # Examples
//! ```
//! use fivestar_core::{PriceCategory, PriceThresholds, categorize_price};
//!
//! # fn main() -> Result<(), fivestar_core::SegmentError> {
//! let hackney = PriceThresholds::new(vec![
//!     40.0, 60.0, 70.0, 85.0, 95.0, 110.0, 125.0, 140.0, 200.0,
//! ])?;
//! assert_eq!(categorize_price(85.0, &hackney)?, PriceCategory::Average);
//! assert_eq!(categorize_price(84.99, &hackney)?, PriceCategory::Cheap);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::numeric::interpolated_percentile;
use crate::{ListingRecord, SegmentError};

/// Number of decile points stored per location.
pub const THRESHOLD_POINTS: usize = 9;

/// Five ordered price bands relative to a location's own price distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceCategory {
    /// Below the second decile.
    VeryCheap,
    /// From the second decile up to the fourth.
    Cheap,
    /// From the fourth decile up to the sixth.
    Average,
    /// From the sixth decile up to the eighth.
    Expensive,
    /// At or above the eighth decile.
    VeryExpensive,
}

impl PriceCategory {
    /// All categories from cheapest to most expensive.
    pub const ALL: [Self; 5] = [
        Self::VeryCheap,
        Self::Cheap,
        Self::Average,
        Self::Expensive,
        Self::VeryExpensive,
    ];

    /// Return the category as a `snake_case` identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryCheap => "very_cheap",
            Self::Cheap => "cheap",
            Self::Average => "average",
            Self::Expensive => "expensive",
            Self::VeryExpensive => "very_expensive",
        }
    }

    /// Human-readable label, e.g. `"very cheap"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryCheap => "very cheap",
            Self::Cheap => "cheap",
            Self::Average => "average",
            Self::Expensive => "expensive",
            Self::VeryExpensive => "very expensive",
        }
    }
}

impl std::fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PriceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown price category '{s}'"))
    }
}

/// Nine non-decreasing price deciles for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PriceThresholds {
    points: [f64; THRESHOLD_POINTS],
}

impl PriceThresholds {
    /// Validate and wrap nine decile points.
    ///
    /// # Errors
    /// Returns [`SegmentError::InvalidThresholds`] when the input does not
    /// hold exactly nine finite, non-decreasing points.
    pub fn new(points: Vec<f64>) -> Result<Self, SegmentError> {
        let points: [f64; THRESHOLD_POINTS] =
            points
                .try_into()
                .map_err(|rejected: Vec<f64>| SegmentError::InvalidThresholds {
                    reason: format!(
                        "expected {THRESHOLD_POINTS} decile points, found {}",
                        rejected.len()
                    ),
                })?;
        if let Some(point) = points.iter().find(|point| !point.is_finite()) {
            return Err(SegmentError::InvalidThresholds {
                reason: format!("decile {point} is not finite"),
            });
        }
        if points
            .iter()
            .zip(points.iter().skip(1))
            .any(|(lower, upper)| lower > upper)
        {
            return Err(SegmentError::InvalidThresholds {
                reason: "deciles must be non-decreasing".to_owned(),
            });
        }
        Ok(Self { points })
    }

    /// Compute deciles from a location's prices, ignoring missing values.
    ///
    /// Uses linear interpolation between closest ranks. A single price gives
    /// degenerate (all equal) thresholds, which simply coarsen the buckets.
    ///
    /// # Errors
    /// Returns [`SegmentError::InvalidThresholds`] when no finite price is
    /// supplied.
    #[expect(clippy::float_arithmetic, reason = "decile fractions are n / 10")]
    pub fn from_prices<I>(prices: I) -> Result<Self, SegmentError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted: Vec<f64> = prices.into_iter().filter(|p| p.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);
        let points = (1_u8..=9)
            .map(|decile| interpolated_percentile(&sorted, f64::from(decile) / 10.0))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| SegmentError::InvalidThresholds {
                reason: "no prices to derive deciles from".to_owned(),
            })?;
        Self::new(points)
    }

    /// The nine decile points in ascending order.
    #[must_use]
    pub const fn points(&self) -> &[f64; THRESHOLD_POINTS] {
        &self.points
    }

    /// Bucket boundaries: the deciles at indices 1, 3, 5 and 7.
    #[must_use]
    pub const fn boundaries(&self) -> [f64; 4] {
        let [_, cheap, _, average, _, expensive, _, very_expensive, _] = self.points;
        [cheap, average, expensive, very_expensive]
    }

    /// Median price of the location (decile index 4).
    #[must_use]
    pub const fn median(&self) -> f64 {
        let [_, _, _, _, median, ..] = self.points;
        median
    }
}

impl TryFrom<Vec<f64>> for PriceThresholds {
    type Error = SegmentError;

    fn try_from(points: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceThresholds> for Vec<f64> {
    fn from(thresholds: PriceThresholds) -> Self {
        thresholds.points.to_vec()
    }
}

/// Map a price onto a band using half-open, left-inclusive boundaries.
///
/// A price equal to a boundary falls into the more expensive band.
///
/// # Errors
/// Returns [`SegmentError::InvalidPrice`] for negative or non-finite prices.
pub fn categorize_price(
    price: f64,
    thresholds: &PriceThresholds,
) -> Result<PriceCategory, SegmentError> {
    if !price.is_finite() || price < 0.0 {
        return Err(SegmentError::InvalidPrice { price });
    }
    let [cheap, average, expensive, very_expensive] = thresholds.boundaries();
    let category = if price < cheap {
        PriceCategory::VeryCheap
    } else if price < average {
        PriceCategory::Cheap
    } else if price < expensive {
        PriceCategory::Average
    } else if price < very_expensive {
        PriceCategory::Expensive
    } else {
        PriceCategory::VeryExpensive
    };
    Ok(category)
}

/// Parse a formatted price such as `"$1,250.00"` or `"£85"`.
///
/// Currency symbols, whitespace and thousands separators are stripped.
///
/// # Errors
/// Returns [`SegmentError::PriceParse`] when nothing numeric remains or the
/// value is not finite.
pub fn parse_price(raw: &str) -> Result<f64, SegmentError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | '£' | '€' | ',') && !c.is_whitespace())
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SegmentError::PriceParse {
            raw: raw.to_owned(),
        })
}

/// A price as it arrives from the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    /// Already numeric.
    Amount(f64),
    /// Formatted text that still needs [`parse_price`].
    Formatted(String),
}

impl RawPrice {
    /// Resolve the numeric amount; `Ok(None)` when the value is missing.
    ///
    /// # Errors
    /// Returns [`SegmentError::PriceParse`] for malformed text.
    pub fn amount(&self) -> Result<Option<f64>, SegmentError> {
        match self {
            Self::Amount(value) if value.is_nan() => Ok(None),
            Self::Amount(value) => Ok(Some(*value)),
            Self::Formatted(text) if text.trim().is_empty() => Ok(None),
            Self::Formatted(text) => parse_price(text).map(Some),
        }
    }
}

/// Price thresholds keyed by location.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceThresholdTable {
    by_location: BTreeMap<String, PriceThresholds>,
}

impl PriceThresholdTable {
    /// Construct an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the thresholds for a location.
    pub fn insert(&mut self, location: impl Into<String>, thresholds: PriceThresholds) {
        self.by_location.insert(location.into(), thresholds);
    }

    /// Add a location while returning `self` for chaining.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>, thresholds: PriceThresholds) -> Self {
        self.insert(location, thresholds);
        self
    }

    /// Thresholds for a location, if known.
    #[must_use]
    pub fn get(&self, location: &str) -> Option<&PriceThresholds> {
        self.by_location.get(location)
    }

    /// Iterate over locations and their thresholds in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PriceThresholds)> {
        self.by_location
            .iter()
            .map(|(location, thresholds)| (location.as_str(), thresholds))
    }

    /// Number of locations with thresholds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_location.len()
    }

    /// Report whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_location.is_empty()
    }

    /// Compute deciles per location from each location's own listings.
    ///
    /// Listings without a location or price are ignored here; the cluster
    /// table build rejects them separately.
    ///
    /// # Errors
    /// Returns [`SegmentError::InvalidDataset`] when a price string is
    /// malformed and [`SegmentError::InvalidThresholds`] when a location has
    /// no usable prices.
    pub fn from_listings(listings: &[ListingRecord]) -> Result<Self, SegmentError> {
        let mut prices: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for listing in listings {
            let Some(location) = listing.location() else {
                continue;
            };
            let amount = listing
                .price
                .amount()
                .map_err(|err| SegmentError::InvalidDataset {
                    listing_id: listing.id,
                    reason: err.to_string(),
                })?;
            let bucket = prices.entry(location).or_default();
            if let Some(price) = amount {
                bucket.push(price);
            }
        }

        let mut table = Self::new();
        for (location, location_prices) in prices {
            let thresholds = PriceThresholds::from_prices(location_prices).map_err(|err| {
                SegmentError::InvalidThresholds {
                    reason: format!("location {location}: {err}"),
                }
            })?;
            debug!(
                "location {location}: deciles {:?}, median {}",
                thresholds.points(),
                thresholds.median()
            );
            table.insert(location, thresholds);
        }
        Ok(table)
    }
}
