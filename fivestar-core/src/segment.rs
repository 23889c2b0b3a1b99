//! Segment keys: the (location, price band, size band) triple peers share.

use serde::{Deserialize, Serialize};

use crate::{
    PriceCategory, PriceThresholds, SegmentError, SizeCategory, categorize_price,
    categorize_property,
};

/// Identity of a peer group.
///
/// Two listings are peers exactly when their keys are equal. The textual
/// form is `L:<location>_P:<price>_S:<size>`, for example
/// `L:Westminster_P:very_cheap_S:room`.
///
/// # Examples
/// ```
/// use fivestar_core::{PriceCategory, SegmentKey, SizeCategory};
///
/// # fn main() -> Result<(), fivestar_core::SegmentError> {
/// let key = SegmentKey::build("Hackney", PriceCategory::Cheap, SizeCategory::Small)?;
/// assert_eq!(key.to_string(), "L:Hackney_P:cheap_S:small");
/// assert_eq!("L:Hackney_P:cheap_S:small".parse::<SegmentKey>()?, key);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentKey {
    location: String,
    price: PriceCategory,
    size: SizeCategory,
}

impl SegmentKey {
    /// Compose a key, trimming the location.
    ///
    /// # Errors
    /// Returns [`SegmentError::MissingAttribute`] when the location is empty.
    pub fn build(
        location: impl AsRef<str>,
        price: PriceCategory,
        size: SizeCategory,
    ) -> Result<Self, SegmentError> {
        let trimmed = location.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SegmentError::MissingAttribute { field: "location" });
        }
        Ok(Self {
            location: trimmed.to_owned(),
            price,
            size,
        })
    }

    /// Location the segment belongs to.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Price band of the segment.
    #[must_use]
    pub const fn price_category(&self) -> PriceCategory {
        self.price
    }

    /// Size band of the segment.
    #[must_use]
    pub const fn size_category(&self) -> SizeCategory {
        self.size
    }
}

impl std::fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L:{}_P:{}_S:{}", self.location, self.price, self.size)
    }
}

impl std::str::FromStr for SegmentKey {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SegmentError::InvalidSegmentKey { raw: s.to_owned() };
        let rest = s.trim().strip_prefix("L:").ok_or_else(invalid)?;
        let (rest, size) = rest.rsplit_once("_S:").ok_or_else(invalid)?;
        let (location, price) = rest.rsplit_once("_P:").ok_or_else(invalid)?;
        let price = price.parse::<PriceCategory>().map_err(|_| invalid())?;
        let size = size.parse::<SizeCategory>().map_err(|_| invalid())?;
        Self::build(location, price, size).map_err(|_| invalid())
    }
}

/// Derive the segment a listing with these attributes belongs to.
///
/// # Errors
/// Propagates price and property categorization errors as well as an empty
/// location.
pub fn segment_key_for(
    location: &str,
    price: f64,
    property_type: &str,
    bedrooms: Option<f64>,
    thresholds: &PriceThresholds,
) -> Result<SegmentKey, SegmentError> {
    let price_category = categorize_price(price, thresholds)?;
    let size = categorize_property(property_type, bedrooms)?;
    SegmentKey::build(location, price_category, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("L:Westminster_P:very_cheap_S:room", "Westminster", PriceCategory::VeryCheap, SizeCategory::Room)]
    #[case("L:Tower Hamlets_P:very_expensive_S:large", "Tower Hamlets", PriceCategory::VeryExpensive, SizeCategory::Large)]
    #[case("L:Kensington_and_Chelsea_P:average_S:small", "Kensington_and_Chelsea", PriceCategory::Average, SizeCategory::Small)]
    fn parses_labels(
        #[case] raw: &str,
        #[case] location: &str,
        #[case] price: PriceCategory,
        #[case] size: SizeCategory,
    ) {
        let key: SegmentKey = raw.parse().expect("valid label");
        assert_eq!(key.location(), location);
        assert_eq!(key.price_category(), price);
        assert_eq!(key.size_category(), size);
        assert_eq!(key.to_string(), raw);
    }

    #[rstest]
    #[case("Westminster_P:cheap_S:room")]
    #[case("L:Westminster_P:pricey_S:room")]
    #[case("L:Westminster_P:cheap")]
    #[case("L:_P:cheap_S:room")]
    fn rejects_malformed_labels(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<SegmentKey>(),
            Err(SegmentError::InvalidSegmentKey {
                raw: raw.to_owned()
            })
        );
    }

    #[rstest]
    fn empty_location_is_missing() {
        assert_eq!(
            SegmentKey::build("  ", PriceCategory::Cheap, SizeCategory::Room),
            Err(SegmentError::MissingAttribute { field: "location" })
        );
    }

    #[rstest]
    fn keys_differ_by_any_component() {
        let a = SegmentKey::build("Hackney", PriceCategory::Cheap, SizeCategory::Room).expect("key");
        let b = SegmentKey::build("Hackney", PriceCategory::Cheap, SizeCategory::Small).expect("key");
        let c = SegmentKey::build("Camden", PriceCategory::Cheap, SizeCategory::Room).expect("key");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
