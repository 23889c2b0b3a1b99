//! Test helpers writing listing exports, thresholds and models to disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

use crate::dataset::DatasetConfig;

/// Hackney deciles; bucket boundaries fall at 60, 85, 110 and 140.
pub(super) const HACKNEY_THRESHOLDS: &str =
    r#"{"Hackney": [40, 60, 70, 85, 95, 110, 125, 140, 200]}"#;

/// Four reviewed Hackney listings plus one with too few reviews.
///
/// Listings 1 and 2 share `L:Hackney_P:average_S:room`; listing 3 is a very
/// cheap room and listing 4 a very expensive large entire place.
pub(super) const HACKNEY_LISTINGS: &str = r#"[
    {"id": 1, "neighbourhood_cleansed": "Hackney", "price": "$90.00", "room_type": "Private room",
     "review_scores_rating": 96, "number_of_reviews": 12, "latitude": 51.54, "longitude": -0.05,
     "amenities": "{Wifi,\"Breakfast\"}", "cancellation_policy": "strict_14_with_grace_period",
     "instant_bookable": "t", "review_scores_cleanliness": 10},
    {"id": 2, "neighbourhood_cleansed": "Hackney", "price": "$100.00", "room_type": "Private room",
     "review_scores_rating": 88, "number_of_reviews": 30, "latitude": 51.55, "longitude": -0.06,
     "amenities": "{Kitchen}", "cancellation_policy": "flexible", "instant_bookable": "f",
     "review_scores_cleanliness": 8},
    {"id": 3, "neighbourhood_cleansed": "Hackney", "price": "$50.00", "room_type": "Private room",
     "review_scores_rating": 70, "number_of_reviews": 5, "latitude": 51.53, "longitude": -0.07},
    {"id": 4, "neighbourhood_cleansed": "Hackney", "price": "$150.00", "room_type": "Entire home/apt",
     "bedrooms": 2, "review_scores_rating": 92, "number_of_reviews": 9, "latitude": 51.56,
     "longitude": -0.04},
    {"id": 5, "neighbourhood_cleansed": "Hackney", "price": "$95.00", "room_type": "Private room",
     "review_scores_rating": 20, "number_of_reviews": 1, "latitude": 51.54, "longitude": -0.05}
]"#;

/// Intercept 82 and a wifi weight of 8.
pub(super) const WIFI_MODEL: &str = r#"{"intercept": 82.0, "coefficients": {"wifi": 8.0}}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// A temporary directory holding the Hackney export, thresholds and model.
#[derive(Debug)]
pub(super) struct HackneyFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl HackneyFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let files = Self { _dir: dir, root };
        write_utf8(&files.listings(), HACKNEY_LISTINGS.as_bytes());
        write_utf8(&files.thresholds(), HACKNEY_THRESHOLDS.as_bytes());
        write_utf8(&files.model(), WIFI_MODEL.as_bytes());
        files
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn listings(&self) -> Utf8PathBuf {
        self.root.join("listings.json")
    }

    pub(super) fn thresholds(&self) -> Utf8PathBuf {
        self.root.join("thresholds.json")
    }

    pub(super) fn model(&self) -> Utf8PathBuf {
        self.root.join("model.json")
    }

    pub(super) fn dataset(&self) -> DatasetConfig {
        DatasetConfig {
            listings: self.listings(),
            thresholds: Some(self.thresholds()),
        }
    }

    /// `--listings` and `--thresholds` flags pointing at these files.
    pub(super) fn dataset_flags(&self) -> Vec<String> {
        vec![
            format!("--{}", crate::ARG_LISTINGS),
            self.listings().into_string(),
            format!("--{}", crate::ARG_THRESHOLDS),
            self.thresholds().into_string(),
        ]
    }
}
