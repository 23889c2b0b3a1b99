//! Listing rows as exported by the listings scrape.

use fivestar_core::{ListingRecord, Offering, RawPrice};
use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::decode::{
    decode_amenities, decode_cancellation, has_amenity, impute_bedrooms, parse_flag,
    parse_percentage,
};

/// A percentage delivered either as a number or as text such as `"95%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRate {
    /// Numeric percentage.
    Number(f64),
    /// Formatted percentage.
    Text(String),
}

impl RawRate {
    /// Numeric value, if one can be read.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value).filter(|v| v.is_finite()),
            Self::Text(text) => parse_percentage(text),
        }
    }
}

/// One listing row using the source column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    /// Listing identifier.
    pub id: u64,
    /// Cleansed neighbourhood name, used as the location.
    #[serde(default)]
    pub neighbourhood_cleansed: Option<String>,
    /// Nightly price, e.g. `"$85.00"`.
    #[serde(default)]
    pub price: Option<RawPrice>,
    /// Room type, e.g. `"Entire home/apt"`.
    #[serde(default)]
    pub room_type: String,
    /// Bedroom count.
    #[serde(default)]
    pub bedrooms: Option<f64>,
    /// Overall review score on a 0 to 100 scale.
    #[serde(default)]
    pub review_scores_rating: Option<f64>,
    /// Number of reviews received.
    #[serde(default)]
    pub number_of_reviews: u32,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Amenities literal, e.g. `{Wifi,"Breakfast"}`.
    #[serde(default)]
    pub amenities: Option<String>,
    /// Cancellation policy name.
    #[serde(default)]
    pub cancellation_policy: Option<String>,
    /// `t` or `f`.
    #[serde(default)]
    pub instant_bookable: Option<String>,
    /// Cleanliness sub-score.
    #[serde(default)]
    pub review_scores_cleanliness: Option<f64>,
    /// Maximum number of guests.
    #[serde(default)]
    pub accommodates: Option<f64>,
    /// Host response rate.
    #[serde(default)]
    pub host_response_rate: Option<RawRate>,
}

impl RawListing {
    /// Decode the row into a listing record.
    ///
    /// Bedrooms are imputed as zero when missing; a missing price stays
    /// missing and is rejected by the cluster table build.
    #[must_use]
    pub fn into_record(self) -> ListingRecord {
        let amenities = self
            .amenities
            .as_deref()
            .map(decode_amenities)
            .unwrap_or_default();
        let offering = Offering {
            cleanliness: self.review_scores_cleanliness,
            wifi: has_amenity(&amenities, "wifi"),
            breakfast: has_amenity(&amenities, "breakfast"),
            cancellation: self
                .cancellation_policy
                .as_deref()
                .map(decode_cancellation)
                .unwrap_or_default(),
            instant_bookable: self
                .instant_bookable
                .as_deref()
                .and_then(parse_flag)
                .unwrap_or(false),
            accommodates: self.accommodates,
            amenity_count: u32::try_from(amenities.len()).unwrap_or(u32::MAX),
            host_response_rate: self.host_response_rate.as_ref().and_then(RawRate::value),
        };
        ListingRecord {
            id: self.id,
            location: self.neighbourhood_cleansed,
            price: self
                .price
                .unwrap_or_else(|| RawPrice::Formatted(String::new())),
            property_type: self.room_type,
            bedrooms: Some(impute_bedrooms(self.bedrooms)),
            review_score: self.review_scores_rating,
            coordinates: Coord {
                x: self.longitude,
                y: self.latitude,
            },
            offering,
        }
    }
}
