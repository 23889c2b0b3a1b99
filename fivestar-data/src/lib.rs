//! Listing data access for FiveStar.
//!
//! Responsibilities:
//! - Read listing exports (JSON or CSV) and fixed threshold tables (JSON).
//! - Decode raw columns (amenity literals, flags, percentages, policies).
//! - Drop rows too thinly reviewed to rank.
//! - Persist cluster assignments.
//!
//! Segmentation rules live in `fivestar-core`; this crate only turns files
//! into [`fivestar_core::ListingRecord`]s and tables back into files.
#![forbid(unsafe_code)]

mod artefact;
pub mod decode;
mod error;
mod filter;
pub mod fs;
mod load;
mod raw;

pub use artefact::{ClusterArtefact, ClusterAssignment, write_cluster_assignments};
pub use error::DatasetError;
pub use filter::{FilterOutcome, MIN_REVIEW_COUNT, filter_reviewed};
pub use load::{ListingFormat, load_listings, load_raw_listings, load_thresholds};
pub use raw::{RawListing, RawRate};
