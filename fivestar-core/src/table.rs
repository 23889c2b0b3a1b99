//! The cluster table: every listing's segment, built once and read many times.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{Arc, PoisonError, RwLock};

use geo::Coord;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    ListingAttributes, ListingRecord, PriceThresholdTable, SegmentError, SegmentKey,
    segment_key_for,
};

/// A listing projected onto the fields needed for ranking and statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterEntry {
    /// Listing identifier.
    pub listing_id: u64,
    /// Segment the listing belongs to.
    pub segment: SegmentKey,
    /// Observed review score on a 0 to 100 scale.
    pub review_score: f64,
    /// Position with `x` as longitude and `y` as latitude.
    pub coordinates: Coord<f64>,
    /// Attributes aggregated by segment statistics.
    pub attributes: ListingAttributes,
}

/// One row of the segment index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSummary {
    /// Dense identifier, stable for a given table.
    pub cluster_id: usize,
    /// The segment.
    pub segment: SegmentKey,
    /// Number of member listings.
    pub listings: usize,
}

/// Immutable mapping from listings to segments.
///
/// # Examples
/// ```
/// use fivestar_core::{ClusterTable, PriceThresholdTable, test_support::ListingBuilder};
///
/// # fn main() -> Result<(), fivestar_core::SegmentError> {
/// let listings = vec![
///     ListingBuilder::new(1).price(50.0).build(),
///     ListingBuilder::new(2).price(150.0).build(),
/// ];
/// let thresholds = PriceThresholdTable::from_listings(&listings)?;
/// let table = ClusterTable::build(&listings, &thresholds)?;
/// assert_eq!(table.len(), 2);
/// assert_ne!(table.segment_of(1)?, table.segment_of(2)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterTable {
    entries: BTreeMap<u64, ClusterEntry>,
    members: BTreeMap<SegmentKey, Vec<u64>>,
    thresholds: PriceThresholdTable,
}

impl ClusterTable {
    /// Build the table from listings and per-location thresholds.
    ///
    /// The build is all-or-nothing.
    ///
    /// # Errors
    /// Returns [`SegmentError::InvalidDataset`] for the first listing with a
    /// missing or out-of-range review score, a missing location, a location
    /// without thresholds, an attribute that cannot be categorized, or an id
    /// that was already seen.
    pub fn build(
        listings: &[ListingRecord],
        thresholds: &PriceThresholdTable,
    ) -> Result<Self, SegmentError> {
        let mut entries = BTreeMap::new();
        for listing in listings {
            let entry = project(listing, thresholds)?;
            match entries.entry(listing.id) {
                Entry::Occupied(_) => {
                    return Err(reject(listing.id, "duplicate listing id"));
                }
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }
        }

        let mut members: BTreeMap<SegmentKey, Vec<u64>> = BTreeMap::new();
        for entry in entries.values() {
            members
                .entry(entry.segment.clone())
                .or_default()
                .push(entry.listing_id);
        }
        debug!(
            "built cluster table: {} listings across {} segments",
            entries.len(),
            members.len()
        );
        Ok(Self {
            entries,
            members,
            thresholds: thresholds.clone(),
        })
    }

    /// Compute thresholds from the listings themselves, then build.
    ///
    /// # Errors
    /// Propagates threshold derivation and build failures.
    pub fn from_listings(listings: &[ListingRecord]) -> Result<Self, SegmentError> {
        let thresholds = PriceThresholdTable::from_listings(listings)?;
        Self::build(listings, &thresholds)
    }

    /// Entry for a listing.
    ///
    /// # Errors
    /// Returns [`SegmentError::NotFound`] for an unknown id.
    pub fn lookup_by_listing_id(&self, listing_id: u64) -> Result<&ClusterEntry, SegmentError> {
        self.entries
            .get(&listing_id)
            .ok_or(SegmentError::NotFound { listing_id })
    }

    /// Members of a segment ordered by listing id; empty for an unknown key.
    #[must_use]
    pub fn lookup_by_segment(&self, key: &SegmentKey) -> Vec<&ClusterEntry> {
        self.members
            .get(key)
            .map(|ids| ids.iter().filter_map(|id| self.entries.get(id)).collect())
            .unwrap_or_default()
    }

    /// Segment of a listing.
    ///
    /// # Errors
    /// Returns [`SegmentError::NotFound`] for an unknown id.
    pub fn segment_of(&self, listing_id: u64) -> Result<&SegmentKey, SegmentError> {
        self.lookup_by_listing_id(listing_id)
            .map(|entry| &entry.segment)
    }

    /// Recompute a segment key from raw fields using this table's thresholds.
    ///
    /// # Errors
    /// Returns [`SegmentError::UnknownLocation`] when the location has no
    /// thresholds and propagates categorization failures.
    pub fn segment_for(
        &self,
        location: &str,
        price: f64,
        property_type: &str,
        bedrooms: Option<f64>,
    ) -> Result<SegmentKey, SegmentError> {
        let location = location.trim();
        let thresholds =
            self.thresholds
                .get(location)
                .ok_or_else(|| SegmentError::UnknownLocation {
                    location: location.to_owned(),
                })?;
        segment_key_for(location, price, property_type, bedrooms, thresholds)
    }

    /// Thresholds the table was built with.
    #[must_use]
    pub const fn thresholds(&self) -> &PriceThresholdTable {
        &self.thresholds
    }

    /// Number of listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the table holds no listings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries ordered by listing id.
    pub fn entries(&self) -> impl Iterator<Item = &ClusterEntry> {
        self.entries.values()
    }

    /// Segment index: each non-empty segment with a dense id and its size.
    #[must_use]
    pub fn segments(&self) -> Vec<SegmentSummary> {
        self.members
            .iter()
            .enumerate()
            .map(|(cluster_id, (segment, ids))| SegmentSummary {
                cluster_id,
                segment: segment.clone(),
                listings: ids.len(),
            })
            .collect()
    }
}

fn reject(listing_id: u64, reason: impl Into<String>) -> SegmentError {
    SegmentError::InvalidDataset {
        listing_id,
        reason: reason.into(),
    }
}

fn project(
    listing: &ListingRecord,
    thresholds: &PriceThresholdTable,
) -> Result<ClusterEntry, SegmentError> {
    let id = listing.id;
    let review_score = match listing.review_score {
        None => return Err(reject(id, "missing review score")),
        Some(score) if !score.is_finite() || !(0.0..=100.0).contains(&score) => {
            return Err(reject(id, format!("review score {score} outside 0..=100")));
        }
        Some(score) => score,
    };
    let location = listing
        .location()
        .ok_or_else(|| reject(id, "missing location"))?;
    let location_thresholds = thresholds
        .get(location)
        .ok_or_else(|| reject(id, format!("no price thresholds for location {location:?}")))?;
    let attributes = listing
        .attributes()
        .map_err(|err| reject(id, err.to_string()))?;
    let segment = segment_key_for(
        location,
        attributes.price,
        &listing.property_type,
        listing.bedrooms,
        location_thresholds,
    )
    .map_err(|err| reject(id, err.to_string()))?;
    Ok(ClusterEntry {
        listing_id: id,
        segment,
        review_score,
        coordinates: listing.coordinates,
        attributes,
    })
}

/// A cluster table that can be swapped for a rebuilt one while readers hold
/// their own snapshot.
#[derive(Debug)]
pub struct SharedClusterTable {
    current: RwLock<Arc<ClusterTable>>,
}

impl SharedClusterTable {
    /// Wrap an initial table.
    #[must_use]
    pub fn new(table: ClusterTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// Current table. The snapshot stays valid after a later [`replace`].
    ///
    /// [`replace`]: Self::replace
    #[must_use]
    pub fn snapshot(&self) -> Arc<ClusterTable> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Install a rebuilt table and return the previous one.
    #[must_use = "dropping the previous table discards readers' last reference"]
    pub fn replace(&self, table: ClusterTable) -> Arc<ClusterTable> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(table))
    }
}
