//! Builders and fixed collaborators used by unit, doc and behaviour tests.
//!
//! Compiled for this crate's own tests and behind the `test-support` feature.

use geo::Coord;

use crate::{
    CancellationPolicy, ListingAttributes, ListingRecord, Offering, RawPrice, ReviewPredictor,
};

/// Fluent builder for [`ListingRecord`] values with sensible defaults.
///
/// Defaults describe a reviewed private room in `"Hackney"` priced at 80.
#[derive(Debug, Clone)]
pub struct ListingBuilder {
    record: ListingRecord,
}

impl ListingBuilder {
    /// Start a listing with the given id.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            record: ListingRecord {
                id,
                location: Some("Hackney".to_owned()),
                price: RawPrice::Amount(80.0),
                property_type: "Private room".to_owned(),
                bedrooms: Some(1.0),
                review_score: Some(90.0),
                coordinates: Coord {
                    x: -0.055,
                    y: 51.545,
                },
                offering: Offering::default(),
            },
        }
    }

    /// Set the location; `None` leaves it missing.
    #[must_use]
    pub fn location(mut self, location: Option<&str>) -> Self {
        self.record.location = location.map(str::to_owned);
        self
    }

    /// Set a numeric price.
    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.record.price = RawPrice::Amount(price);
        self
    }

    /// Set the price as delivered by the source.
    #[must_use]
    pub fn raw_price(mut self, price: RawPrice) -> Self {
        self.record.price = price;
        self
    }

    /// Set the room type label.
    #[must_use]
    pub fn property_type(mut self, property_type: &str) -> Self {
        property_type.clone_into(&mut self.record.property_type);
        self
    }

    /// Set the bedroom count.
    #[must_use]
    pub const fn bedrooms(mut self, bedrooms: Option<f64>) -> Self {
        self.record.bedrooms = bedrooms;
        self
    }

    /// Set the review score.
    #[must_use]
    pub const fn score(mut self, score: Option<f64>) -> Self {
        self.record.review_score = score;
        self
    }

    /// Set longitude and latitude.
    #[must_use]
    pub const fn at(mut self, longitude: f64, latitude: f64) -> Self {
        self.record.coordinates = Coord {
            x: longitude,
            y: latitude,
        };
        self
    }

    /// Set the cleanliness sub-score.
    #[must_use]
    pub const fn cleanliness(mut self, cleanliness: Option<f64>) -> Self {
        self.record.offering.cleanliness = cleanliness;
        self
    }

    /// Set whether wifi is offered.
    #[must_use]
    pub const fn wifi(mut self, wifi: bool) -> Self {
        self.record.offering.wifi = wifi;
        self
    }

    /// Set whether breakfast is offered.
    #[must_use]
    pub const fn breakfast(mut self, breakfast: bool) -> Self {
        self.record.offering.breakfast = breakfast;
        self
    }

    /// Set the cancellation policy.
    #[must_use]
    pub const fn cancellation(mut self, policy: CancellationPolicy) -> Self {
        self.record.offering.cancellation = policy;
        self
    }

    /// Set instant bookability.
    #[must_use]
    pub const fn instant_bookable(mut self, instant: bool) -> Self {
        self.record.offering.instant_bookable = instant;
        self
    }

    /// Set the number of amenities.
    #[must_use]
    pub const fn amenities(mut self, count: u32) -> Self {
        self.record.offering.amenity_count = count;
        self
    }

    /// Finish the record.
    #[must_use]
    pub fn build(self) -> ListingRecord {
        self.record
    }
}

/// Predictor returning the same score for every listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPredictor(pub f64);

impl ReviewPredictor for FixedPredictor {
    fn predict(&self, _attributes: &ListingAttributes) -> f64 {
        self.0
    }
}

/// Predictor adding fixed bonuses for wifi and breakfast to a base score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmenityPredictor {
    /// Score with neither amenity.
    pub base: f64,
    /// Bonus when wifi is offered.
    pub wifi_bonus: f64,
    /// Bonus when breakfast is offered.
    pub breakfast_bonus: f64,
}

impl ReviewPredictor for AmenityPredictor {
    #[expect(clippy::float_arithmetic, reason = "predictions add bonuses")]
    fn predict(&self, attributes: &ListingAttributes) -> f64 {
        let wifi = if attributes.wifi { self.wifi_bonus } else { 0.0 };
        let breakfast = if attributes.breakfast {
            self.breakfast_bonus
        } else {
            0.0
        };
        self.base + wifi + breakfast
    }
}
