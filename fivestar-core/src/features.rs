//! Named numeric features derived from [`ListingAttributes`].
//!
//! Review models address features by name; missing values contribute `0.0`.

use crate::ListingAttributes;

/// A named, pure projection of listing attributes onto a number.
#[derive(Debug, Clone, Copy)]
pub struct DerivedFeature {
    /// Feature name as used in model coefficient files.
    pub name: &'static str,
    /// Projection.
    pub derive: fn(&ListingAttributes) -> f64,
}

const fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

#[expect(clippy::float_arithmetic, reason = "ratio of guests to bedrooms")]
fn accommodates_to_rooms_ratio(attributes: &ListingAttributes) -> f64 {
    let guests = attributes.accommodates.unwrap_or_default();
    let rooms = if attributes.bedrooms > 0.0 {
        attributes.bedrooms
    } else {
        1.0
    };
    guests / rooms
}

/// Every feature a review model may reference.
pub const DERIVED_FEATURES: &[DerivedFeature] = &[
    DerivedFeature {
        name: "price",
        derive: |a| a.price,
    },
    DerivedFeature {
        name: "cleanliness",
        derive: |a| a.cleanliness.unwrap_or_default(),
    },
    DerivedFeature {
        name: "wifi",
        derive: |a| flag(a.wifi),
    },
    DerivedFeature {
        name: "breakfast",
        derive: |a| flag(a.breakfast),
    },
    DerivedFeature {
        name: "cancellation_strict",
        derive: |a| flag(a.cancellation.is_strict()),
    },
    DerivedFeature {
        name: "instant_bookable",
        derive: |a| flag(a.instant_bookable),
    },
    DerivedFeature {
        name: "room_entire",
        derive: |a| flag(a.entire_place),
    },
    DerivedFeature {
        name: "amenity_count",
        derive: |a| f64::from(a.amenity_count),
    },
    DerivedFeature {
        name: "accommodates_to_rooms_ratio",
        derive: accommodates_to_rooms_ratio,
    },
    DerivedFeature {
        name: "host_response_rate",
        derive: |a| a.host_response_rate.unwrap_or_default(),
    },
];

/// Look up a feature by name.
#[must_use]
pub fn feature(name: &str) -> Option<&'static DerivedFeature> {
    DERIVED_FEATURES.iter().find(|feature| feature.name == name)
}

/// All features of a listing, in [`DERIVED_FEATURES`] order.
#[must_use]
pub fn feature_vector(attributes: &ListingAttributes) -> Vec<(&'static str, f64)> {
    DERIVED_FEATURES
        .iter()
        .map(|feature| (feature.name, (feature.derive)(attributes)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ListingBuilder;
    use crate::CancellationPolicy;
    use rstest::rstest;

    fn attributes() -> ListingAttributes {
        let mut attributes = ListingBuilder::new(1)
            .price(120.0)
            .property_type("Entire home/apt")
            .bedrooms(Some(2.0))
            .wifi(true)
            .cancellation(CancellationPolicy::Strict)
            .amenities(12)
            .build()
            .attributes()
            .expect("attributes resolve");
        attributes.accommodates = Some(5.0);
        attributes
    }

    #[rstest]
    #[case("price", 120.0)]
    #[case("cleanliness", 0.0)]
    #[case("wifi", 1.0)]
    #[case("breakfast", 0.0)]
    #[case("cancellation_strict", 1.0)]
    #[case("room_entire", 1.0)]
    #[case("amenity_count", 12.0)]
    #[case("accommodates_to_rooms_ratio", 2.5)]
    #[case("host_response_rate", 0.0)]
    fn derives_named_features(#[case] name: &str, #[case] expected: f64) {
        let feature = feature(name).expect("known feature");
        assert_eq!((feature.derive)(&attributes()), expected);
    }

    #[rstest]
    fn zero_bedrooms_count_as_one_room() {
        let mut attrs = attributes();
        attrs.bedrooms = 0.0;
        assert_eq!(accommodates_to_rooms_ratio(&attrs), 5.0);
    }

    #[rstest]
    fn vector_covers_every_feature() {
        let vector = feature_vector(&attributes());
        assert_eq!(vector.len(), DERIVED_FEATURES.len());
        assert!(feature("word_count").is_none());
    }
}
