//! Upstream filtering of rows too thinly reviewed to rank.

use log::{debug, warn};

use crate::RawListing;

/// Rows need strictly more reviews than this to be kept.
pub const MIN_REVIEW_COUNT: u32 = 2;

/// Rows kept by [`filter_reviewed`] and how many were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Rows with a review score and enough reviews.
    pub kept: Vec<RawListing>,
    /// Number of rows discarded.
    pub dropped: usize,
}

/// Keep rows with a review score and more than [`MIN_REVIEW_COUNT`] reviews.
#[must_use]
pub fn filter_reviewed(rows: Vec<RawListing>) -> FilterOutcome {
    let total = rows.len();
    let kept: Vec<RawListing> = rows
        .into_iter()
        .filter(|row| {
            let keep = row.review_scores_rating.is_some_and(f64::is_finite)
                && row.number_of_reviews > MIN_REVIEW_COUNT;
            if !keep {
                debug!(
                    "dropping listing {}: score {:?}, {} reviews",
                    row.id, row.review_scores_rating, row.number_of_reviews
                );
            }
            keep
        })
        .collect();
    let dropped = total.saturating_sub(kept.len());
    if dropped > 0 {
        warn!("Skipped {dropped} of {total} listings without enough reviews");
    }
    FilterOutcome { kept, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(id: u64, score: Option<f64>, reviews: u32) -> RawListing {
        RawListing {
            id,
            neighbourhood_cleansed: Some("Camden".to_owned()),
            price: None,
            room_type: "Private room".to_owned(),
            bedrooms: None,
            review_scores_rating: score,
            number_of_reviews: reviews,
            latitude: 51.54,
            longitude: -0.14,
            amenities: None,
            cancellation_policy: None,
            instant_bookable: None,
            review_scores_cleanliness: None,
            accommodates: None,
            host_response_rate: None,
        }
    }

    #[rstest]
    fn keeps_reviewed_rows_only() {
        let outcome = filter_reviewed(vec![
            row(1, Some(90.0), 3),
            row(2, Some(90.0), 2),
            row(3, None, 40),
            row(4, Some(f64::NAN), 40),
            row(5, Some(70.0), 100),
        ]);
        let ids: Vec<u64> = outcome.kept.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 5]);
        assert_eq!(outcome.dropped, 3);
    }
}
