//! Listing records and the typed attributes used for statistics and
//! what-if analysis.

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::{RawPrice, SegmentError, is_entire_place};

/// Cancellation policy reduced to the strictness levels that matter here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationPolicy {
    /// Full refund close to arrival.
    #[default]
    Flexible,
    /// Partial refund window.
    Moderate,
    /// Strict, including the super-strict variants.
    Strict,
}

impl CancellationPolicy {
    /// Report whether the policy counts as strict.
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Non-segmenting attributes of a listing as delivered by the loader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Offering {
    /// Cleanliness review sub-score, when reported.
    pub cleanliness: Option<f64>,
    /// Wifi listed among the amenities.
    pub wifi: bool,
    /// Breakfast listed among the amenities.
    pub breakfast: bool,
    /// Cancellation policy.
    pub cancellation: CancellationPolicy,
    /// Guests can book without host approval.
    pub instant_bookable: bool,
    /// Maximum number of guests.
    pub accommodates: Option<f64>,
    /// Number of distinct amenities listed.
    pub amenity_count: u32,
    /// Host response rate as a percentage.
    pub host_response_rate: Option<f64>,
}

/// One listing as consumed by the cluster table build.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    /// Unique listing identifier.
    pub id: u64,
    /// Neighbourhood or borough name.
    pub location: Option<String>,
    /// Nightly price, possibly still formatted.
    pub price: RawPrice,
    /// Room type label, e.g. `"Entire home/apt"`.
    pub property_type: String,
    /// Bedroom count; required only for entire places.
    pub bedrooms: Option<f64>,
    /// Overall review score on a 0 to 100 scale.
    pub review_score: Option<f64>,
    /// Position with `x` as longitude and `y` as latitude.
    pub coordinates: Coord<f64>,
    /// Remaining attributes.
    pub offering: Offering,
}

impl ListingRecord {
    /// Trimmed, non-empty location.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
    }

    /// Resolve the typed attribute record.
    ///
    /// Missing bedrooms are treated as zero.
    ///
    /// # Errors
    /// Returns [`SegmentError::PriceParse`] for a malformed price and
    /// [`SegmentError::MissingAttribute`] when the price is absent.
    pub fn attributes(&self) -> Result<ListingAttributes, SegmentError> {
        let price = self
            .price
            .amount()?
            .ok_or(SegmentError::MissingAttribute { field: "price" })?;
        let offering = &self.offering;
        Ok(ListingAttributes {
            price,
            cleanliness: offering.cleanliness,
            wifi: offering.wifi,
            breakfast: offering.breakfast,
            cancellation: offering.cancellation,
            instant_bookable: offering.instant_bookable,
            entire_place: is_entire_place(&self.property_type),
            accommodates: offering.accommodates,
            bedrooms: self.bedrooms.filter(|count| count.is_finite()).unwrap_or(0.0),
            amenity_count: offering.amenity_count,
            host_response_rate: offering.host_response_rate,
        })
    }
}

/// Typed view of everything the statistics and the review model consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingAttributes {
    /// Nightly price.
    pub price: f64,
    /// Cleanliness sub-score, when reported.
    pub cleanliness: Option<f64>,
    /// Wifi offered.
    pub wifi: bool,
    /// Breakfast offered.
    pub breakfast: bool,
    /// Cancellation policy.
    pub cancellation: CancellationPolicy,
    /// Instantly bookable.
    pub instant_bookable: bool,
    /// The whole property is let.
    pub entire_place: bool,
    /// Maximum number of guests.
    pub accommodates: Option<f64>,
    /// Bedroom count, zero when unknown.
    pub bedrooms: f64,
    /// Number of distinct amenities.
    pub amenity_count: u32,
    /// Host response rate percentage.
    pub host_response_rate: Option<f64>,
}

/// Hypothetical changes a host may try out. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeOverrides {
    /// New nightly price.
    pub price: Option<f64>,
    /// New cleanliness sub-score.
    pub cleanliness: Option<f64>,
    /// Offer or withdraw wifi.
    pub wifi: Option<bool>,
    /// Offer or withdraw breakfast.
    pub breakfast: Option<bool>,
    /// Switch to or away from a strict cancellation policy.
    pub strict_cancellation: Option<bool>,
    /// Enable or disable instant booking.
    pub instant_bookable: Option<bool>,
}

impl AttributeOverrides {
    /// Report whether no field is overridden.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.cleanliness.is_none()
            && self.wifi.is_none()
            && self.breakfast.is_none()
            && self.strict_cancellation.is_none()
            && self.instant_bookable.is_none()
    }
}

/// Apply overrides to a copy of `base`.
///
/// Turning strict cancellation off moves a strict policy to
/// [`CancellationPolicy::Moderate`]; a non-strict policy is kept. Adding or
/// removing an amenity adjusts `amenity_count` accordingly.
///
/// # Examples
/// ```
/// use fivestar_core::{AttributeOverrides, test_support::ListingBuilder, with_overrides};
///
/// # fn main() -> Result<(), fivestar_core::SegmentError> {
/// let base = ListingBuilder::new(1).wifi(false).build().attributes()?;
/// let changed = with_overrides(&base, &AttributeOverrides {
///     wifi: Some(true),
///     ..AttributeOverrides::default()
/// });
/// assert!(changed.wifi);
/// assert!(!base.wifi);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn with_overrides(base: &ListingAttributes, changes: &AttributeOverrides) -> ListingAttributes {
    let mut next = base.clone();
    if let Some(price) = changes.price {
        next.price = price;
    }
    if let Some(cleanliness) = changes.cleanliness {
        next.cleanliness = Some(cleanliness);
    }
    if let Some(wifi) = changes.wifi {
        next.amenity_count = toggle_amenity(next.amenity_count, base.wifi, wifi);
        next.wifi = wifi;
    }
    if let Some(breakfast) = changes.breakfast {
        next.amenity_count = toggle_amenity(next.amenity_count, base.breakfast, breakfast);
        next.breakfast = breakfast;
    }
    if let Some(strict) = changes.strict_cancellation {
        next.cancellation = match (strict, base.cancellation) {
            (true, _) => CancellationPolicy::Strict,
            (false, CancellationPolicy::Strict) => CancellationPolicy::Moderate,
            (false, other) => other,
        };
    }
    if let Some(instant) = changes.instant_bookable {
        next.instant_bookable = instant;
    }
    next
}

const fn toggle_amenity(count: u32, had: bool, has: bool) -> u32 {
    match (had, has) {
        (false, true) => count.saturating_add(1),
        (true, false) => count.saturating_sub(1),
        _ => count,
    }
}
