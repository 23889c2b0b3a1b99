//! Decoders for raw listing columns.

use std::collections::BTreeSet;

use fivestar_core::CancellationPolicy;

/// Policies treated as strict.
pub const STRICT_POLICIES: [&str; 4] = [
    "strict",
    "strict_14_with_grace_period",
    "super_strict_30",
    "super_strict_60",
];

/// Decode an amenities literal such as `{Wifi,"Hair dryer",Breakfast}` into
/// a case-folded set.
#[must_use]
pub fn decode_amenities(raw: &str) -> BTreeSet<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(trimmed);
    inner
        .split(',')
        .map(|item| item.trim().trim_matches('"').trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Report whether a decoded set lists `name`, ignoring case.
#[must_use]
pub fn has_amenity(amenities: &BTreeSet<String>, name: &str) -> bool {
    amenities.contains(&name.to_lowercase())
}

/// Parse a `t`/`f` flag; anything else is unknown.
#[must_use]
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "t" | "true" | "1" => Some(true),
        "f" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a percentage such as `"95%"`.
#[must_use]
pub fn parse_percentage(raw: &str) -> Option<f64> {
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Reduce a source cancellation policy to its strictness level.
#[must_use]
pub fn decode_cancellation(raw: &str) -> CancellationPolicy {
    let policy = raw.trim().to_lowercase();
    if STRICT_POLICIES.contains(&policy.as_str()) {
        CancellationPolicy::Strict
    } else if policy == "moderate" {
        CancellationPolicy::Moderate
    } else {
        CancellationPolicy::Flexible
    }
}

/// Missing or non-finite bedroom counts become zero.
#[must_use]
pub fn impute_bedrooms(bedrooms: Option<f64>) -> f64 {
    bedrooms.filter(|count| count.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_amenity_literals() {
        let amenities = decode_amenities(r#"{Wifi,"Hair dryer",Breakfast,"Free parking on premises"}"#);
        assert_eq!(amenities.len(), 4);
        assert!(has_amenity(&amenities, "WIFI"));
        assert!(has_amenity(&amenities, "hair dryer"));
        assert!(!has_amenity(&amenities, "pool"));
    }

    #[rstest]
    #[case("{}", 0)]
    #[case("", 0)]
    #[case("{Wifi,wifi}", 1)]
    fn handles_degenerate_literals(#[case] raw: &str, #[case] expected: usize) {
        assert_eq!(decode_amenities(raw).len(), expected);
    }

    #[rstest]
    #[case("t", Some(true))]
    #[case("f", Some(false))]
    #[case("maybe", None)]
    fn parses_flags(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_flag(raw), expected);
    }

    #[rstest]
    #[case("95%", Some(95.0))]
    #[case(" 100 % ", Some(100.0))]
    #[case("N/A", None)]
    fn parses_percentages(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_percentage(raw), expected);
    }

    #[rstest]
    #[case("strict_14_with_grace_period", CancellationPolicy::Strict)]
    #[case("super_strict_60", CancellationPolicy::Strict)]
    #[case("moderate", CancellationPolicy::Moderate)]
    #[case("flexible", CancellationPolicy::Flexible)]
    #[case("unheard_of", CancellationPolicy::Flexible)]
    fn decodes_cancellation(#[case] raw: &str, #[case] expected: CancellationPolicy) {
        assert_eq!(decode_cancellation(raw), expected);
    }

    #[rstest]
    #[case(None, 0.0)]
    #[case(Some(f64::NAN), 0.0)]
    #[case(Some(3.0), 3.0)]
    fn imputes_bedrooms(#[case] raw: Option<f64>, #[case] expected: f64) {
        assert_eq!(impute_bedrooms(raw), expected);
    }
}
