//! Small numeric helpers shared by thresholds, ranking and statistics.

/// Convert a count to `f64` without a lossy `as` cast.
pub(crate) fn count_as_f64(count: usize) -> f64 {
    u32::try_from(count).map_or(f64::from(u32::MAX), f64::from)
}

/// Percentile of an ascending slice using linear interpolation between the
/// closest ranks (`h = (n - 1) * fraction`).
///
/// Returns `None` for an empty slice.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "interpolation needs the floor of a non-negative rank position"
)]
pub(crate) fn interpolated_percentile(sorted: &[f64], fraction: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = fraction.clamp(0.0, 1.0) * count_as_f64(last);
    let lower = position.floor();
    let lower_index = lower as usize;
    let lower_value = *sorted.get(lower_index)?;
    let upper_value = sorted
        .get(lower_index.saturating_add(1))
        .copied()
        .unwrap_or(lower_value);
    Some(lower_value + (upper_value - lower_value) * (position - lower))
}

/// Arithmetic mean, `None` when there are no values.
#[expect(clippy::float_arithmetic, reason = "means divide a sum by a count")]
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), value| {
            (sum + value, count.saturating_add(1))
        });
    (count > 0).then(|| sum / count_as_f64(count))
}

/// Share of `part` in `whole` as a whole percentage, rounded half-up.
///
/// Uses integer arithmetic so `1 / 8` (12.5%) always rounds to 13.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "half-up rounding is expressed as (2 * 100 * part + whole) / (2 * whole)"
)]
pub(crate) fn rounded_percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let numerator = part.saturating_mul(200).saturating_add(whole);
    let denominator = whole.saturating_mul(2);
    u8::try_from(numerator / denominator).unwrap_or(100)
}

/// Number of items making up `fraction` of `count`, rounded half-up.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "fraction is validated to 0.0..=1.0 so the product fits in usize"
)]
pub(crate) fn rounded_count(count: usize, fraction: f64) -> usize {
    let scaled = (count_as_f64(count) * fraction).round();
    (scaled as usize).min(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.5, 3.0)]
    #[case(&[1.0, 2.0, 3.0, 4.0], 0.5, 2.5)]
    #[case(&[10.0, 20.0], 0.1, 11.0)]
    #[case(&[7.0], 0.9, 7.0)]
    #[case(&[1.0, 2.0, 3.0], 1.0, 3.0)]
    fn interpolates_between_closest_ranks(
        #[case] sorted: &[f64],
        #[case] fraction: f64,
        #[case] expected: f64,
    ) {
        let value = interpolated_percentile(sorted, fraction).expect("non-empty input");
        assert!((value - expected).abs() < 1e-9, "got {value}, want {expected}");
    }

    #[rstest]
    fn percentile_of_nothing_is_none() {
        assert!(interpolated_percentile(&[], 0.5).is_none());
    }

    #[rstest]
    #[case(1, 8, 13)]
    #[case(3, 8, 38)]
    #[case(0, 5, 0)]
    #[case(5, 5, 100)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    fn percentages_round_half_up(#[case] part: usize, #[case] whole: usize, #[case] want: u8) {
        assert_eq!(rounded_percentage(part, whole), want);
    }

    #[rstest]
    #[case(50, 0.1, 5)]
    #[case(5, 0.25, 1)]
    #[case(6, 0.25, 2)]
    #[case(10, 0.25, 3)]
    #[case(0, 0.5, 0)]
    #[case(3, 1.0, 3)]
    fn counts_round_half_up(#[case] count: usize, #[case] fraction: f64, #[case] want: usize) {
        assert_eq!(rounded_count(count, fraction), want);
    }

    #[rstest]
    fn mean_of_scores() {
        let value = mean([95.0, 95.0, 90.0, 80.0, 70.0]).expect("values present");
        assert!((value - 86.0).abs() < 1e-9);
        assert!(mean(std::iter::empty()).is_none());
    }
}
