//! Unit coverage for the linear review model.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::io::Write;

use camino::Utf8PathBuf;
use fivestar_core::{ListingAttributes, ReviewPredictor, test_support::ListingBuilder};
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use crate::{LinearModelSpec, LinearReviewModel, ModelError, load_linear_model};

#[fixture]
fn attributes() -> ListingAttributes {
    ListingBuilder::new(1)
        .wifi(true)
        .cleanliness(Some(9.0))
        .build()
        .attributes()
        .expect("attributes resolve")
}

fn spec(intercept: f64, coefficients: &[(&str, f64)]) -> LinearModelSpec {
    LinearModelSpec {
        intercept,
        coefficients: coefficients
            .iter()
            .map(|&(name, weight)| (name.to_owned(), weight))
            .collect::<BTreeMap<_, _>>(),
    }
}

#[rstest]
#[expect(
    clippy::float_arithmetic,
    reason = "test compares floats with a tolerance"
)]
fn weighs_named_features(attributes: ListingAttributes) {
    let model = LinearReviewModel::from_spec(&spec(50.0, &[("wifi", 5.0), ("cleanliness", 3.0)]))
        .expect("valid model");
    let predicted = model.predict(&attributes);
    assert!((predicted - 82.0).abs() < 1e-9, "got {predicted}");
}

#[rstest]
#[case(150.0, 100.0)]
#[case(-20.0, 0.0)]
fn clamps_to_review_scale(
    attributes: ListingAttributes,
    #[case] intercept: f64,
    #[case] expected: f64,
) {
    let model = LinearReviewModel::from_spec(&spec(intercept, &[])).expect("valid model");
    assert_eq!(model.predict(&attributes), expected);
}

#[rstest]
fn rejects_unknown_features() {
    let err = LinearReviewModel::from_spec(&spec(50.0, &[("word_count", 1.0)]))
        .expect_err("unknown feature");
    assert!(matches!(err, ModelError::UnknownFeature { name } if name == "word_count"));
}

#[rstest]
#[case(f64::NAN, &[])]
#[case(50.0, &[("wifi", f64::INFINITY)])]
fn rejects_non_finite_weights(#[case] intercept: f64, #[case] coefficients: &[(&str, f64)]) {
    assert!(matches!(
        LinearReviewModel::from_spec(&spec(intercept, coefficients)),
        Err(ModelError::InvalidCoefficient { .. })
    ));
}

#[rstest]
fn loads_from_json() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(br#"{"intercept": 70.0, "coefficients": {"breakfast": 4.0}}"#)
        .expect("write model");
    let path = Utf8PathBuf::from_path_buf(file.path().to_path_buf()).expect("utf8 path");
    let model = load_linear_model(&path).expect("model loads");
    assert_eq!(model.feature_names().collect::<Vec<_>>(), vec!["breakfast"]);
}

#[rstest]
fn reports_undecodable_files() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(b"not json").expect("write model");
    let path = Utf8PathBuf::from_path_buf(file.path().to_path_buf()).expect("utf8 path");
    assert!(matches!(
        load_linear_model(&path),
        Err(ModelError::Decode { .. })
    ));
}
