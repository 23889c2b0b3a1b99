//! Read-only queries answered from raw listing fields, as a front end asks
//! them.

use geo::Coord;

use crate::{
    ClusterTable, PriceCategory, SegmentError, SegmentKey, SegmentStatistics, categorize_price,
    rank, segment_statistics, top_fraction,
};

/// Query facade borrowing a built [`ClusterTable`].
#[derive(Debug, Clone, Copy)]
pub struct SegmentQueries<'a> {
    table: &'a ClusterTable,
}

impl<'a> SegmentQueries<'a> {
    /// Borrow a table for querying.
    #[must_use]
    pub const fn new(table: &'a ClusterTable) -> Self {
        Self { table }
    }

    /// Coordinates of every member of the segment the raw fields map to.
    ///
    /// # Errors
    /// Propagates [`ClusterTable::segment_for`] failures.
    pub fn cluster_coordinates(
        &self,
        location: &str,
        price: f64,
        property_type: &str,
        bedrooms: Option<f64>,
    ) -> Result<Vec<Coord<f64>>, SegmentError> {
        let key = self
            .table
            .segment_for(location, price, property_type, bedrooms)?;
        Ok(self
            .table
            .lookup_by_segment(&key)
            .into_iter()
            .map(|entry| entry.coordinates)
            .collect())
    }

    /// Percentile rank and segment mean of a listing within the segment the
    /// raw fields map to.
    ///
    /// # Errors
    /// Returns [`SegmentError::NotFound`] when the listing is unknown or sits
    /// in a different segment, and propagates ranking failures.
    pub fn segment_ranking(
        &self,
        location: &str,
        price: f64,
        property_type: &str,
        bedrooms: Option<f64>,
        listing_id: u64,
    ) -> Result<(f64, f64), SegmentError> {
        let key = self
            .table
            .segment_for(location, price, property_type, bedrooms)?;
        if self.table.segment_of(listing_id)? != &key {
            return Err(SegmentError::NotFound { listing_id });
        }
        let standing = rank(listing_id, self.table)?;
        Ok((standing.percentile, standing.segment_mean))
    }

    /// Statistics of a segment.
    ///
    /// # Errors
    /// Returns [`SegmentError::EmptySegment`] for a segment without members.
    pub fn segment_averages(&self, key: &SegmentKey) -> Result<SegmentStatistics, SegmentError> {
        segment_statistics(key, self.table)
    }

    /// Segment a listing was assigned to.
    ///
    /// # Errors
    /// Returns [`SegmentError::NotFound`] for an unknown id.
    pub fn listing_to_segment(&self, listing_id: u64) -> Result<SegmentKey, SegmentError> {
        self.table.segment_of(listing_id).cloned()
    }

    /// Best-reviewed listings of a segment.
    ///
    /// # Errors
    /// Returns [`SegmentError::InvalidFraction`] for a fraction outside
    /// `0.0..=1.0`.
    pub fn top_listings(&self, key: &SegmentKey, fraction: f64) -> Result<Vec<u64>, SegmentError> {
        top_fraction(key, self.table, fraction)
    }

    /// Price band a price falls into at a location.
    ///
    /// # Errors
    /// Returns [`SegmentError::UnknownLocation`] or
    /// [`SegmentError::InvalidPrice`].
    pub fn price_category(&self, location: &str, price: f64) -> Result<PriceCategory, SegmentError> {
        let location = location.trim();
        let thresholds = self.table.thresholds().get(location).ok_or_else(|| {
            SegmentError::UnknownLocation {
                location: location.to_owned(),
            }
        })?;
        categorize_price(price, thresholds)
    }

    /// Median price of a location, shown as the "location average".
    ///
    /// # Errors
    /// Returns [`SegmentError::UnknownLocation`] when the location has no
    /// thresholds.
    pub fn location_median_price(&self, location: &str) -> Result<f64, SegmentError> {
        let location = location.trim();
        self.table
            .thresholds()
            .get(location)
            .map(crate::PriceThresholds::median)
            .ok_or_else(|| SegmentError::UnknownLocation {
                location: location.to_owned(),
            })
    }
}
