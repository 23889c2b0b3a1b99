//! Property size bands derived from room type and bedroom count.

use serde::{Deserialize, Serialize};

use crate::SegmentError;

/// Room type label used by the data source for a whole property.
pub const ENTIRE_PLACE: &str = "Entire home/apt";

/// Coarse size of the offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    /// A private or shared room rather than the entire property.
    Room,
    /// An entire place with fewer than two bedrooms.
    Small,
    /// An entire place with two or more bedrooms.
    Large,
}

impl SizeCategory {
    /// All size categories in ascending order.
    pub const ALL: [Self; 3] = [Self::Room, Self::Small, Self::Large];

    /// Return the category as a lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::Small => "small",
            Self::Large => "large",
        }
    }
}

impl std::fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SizeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown size category '{s}'"))
    }
}

/// Report whether a room type denotes the entire property.
#[must_use]
pub fn is_entire_place(property_type: &str) -> bool {
    let trimmed = property_type.trim();
    trimmed.eq_ignore_ascii_case(ENTIRE_PLACE) || trimmed.eq_ignore_ascii_case("entire place")
}

/// Map a room type and bedroom count onto a [`SizeCategory`].
///
/// Bedrooms are only consulted for entire places.
///
/// # Errors
/// Returns [`SegmentError::MissingAttribute`] when an entire place has no
/// usable bedroom count.
///
/// # Examples
/// ```
/// use fivestar_core::{SizeCategory, categorize_property};
///
/// assert_eq!(categorize_property("Private room", None), Ok(SizeCategory::Room));
/// assert_eq!(categorize_property("Entire home/apt", Some(1.0)), Ok(SizeCategory::Small));
/// assert_eq!(categorize_property("Entire home/apt", Some(3.0)), Ok(SizeCategory::Large));
/// ```
pub fn categorize_property(
    property_type: &str,
    bedrooms: Option<f64>,
) -> Result<SizeCategory, SegmentError> {
    if !is_entire_place(property_type) {
        return Ok(SizeCategory::Room);
    }
    match bedrooms {
        Some(count) if count.is_finite() && count >= 0.0 && count < 2.0 => Ok(SizeCategory::Small),
        Some(count) if count.is_finite() && count >= 2.0 => Ok(SizeCategory::Large),
        _ => Err(SegmentError::MissingAttribute { field: "bedrooms" }),
    }
}
