//! Behavioural coverage for what-if analysis driven by a linear model.
#![expect(
    clippy::expect_used,
    reason = "behaviour steps fail fast when scenario state is missing"
)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use fivestar_core::{
    AttributeOverrides, ClusterTable, SegmentError, WhatIfOutcome, analyse_what_if,
    test_support::ListingBuilder,
};
use fivestar_model::{LinearModelSpec, LinearReviewModel};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type Outcome = RefCell<Option<Result<WhatIfOutcome, SegmentError>>>;

const LAST_ROOM: u64 = 4;

/// Model under test.
#[fixture]
pub fn model() -> RefCell<Option<LinearReviewModel>> {
    RefCell::new(None)
}

/// Segment the analysed listing belongs to.
#[fixture]
pub fn table() -> RefCell<Option<ClusterTable>> {
    RefCell::new(None)
}

/// Analysis outcome.
#[fixture]
pub fn outcome() -> Outcome {
    RefCell::new(None)
}

#[given("a linear model with intercept 82 and a wifi weight of 8")]
fn linear_model(model: &RefCell<Option<LinearReviewModel>>) {
    let spec = LinearModelSpec {
        intercept: 82.0,
        coefficients: BTreeMap::from([("wifi".to_owned(), 8.0)]),
    };
    *model.borrow_mut() = Some(LinearReviewModel::from_spec(&spec).expect("valid model"));
}

#[given("four Hackney rooms scoring 95, 92, 88 and 80 where only the last lacks wifi")]
fn four_rooms(table: &RefCell<Option<ClusterTable>>) {
    let listings: Vec<_> = [95.0, 92.0, 88.0, 80.0]
        .into_iter()
        .zip(1..)
        .map(|(score, id)| {
            ListingBuilder::new(id)
                .score(Some(score))
                .wifi(id != LAST_ROOM)
                .build()
        })
        .collect();
    *table.borrow_mut() = Some(ClusterTable::from_listings(&listings).expect("table builds"));
}

fn analyse(
    model: &RefCell<Option<LinearReviewModel>>,
    table: &RefCell<Option<ClusterTable>>,
    outcome: &Outcome,
    overrides: &AttributeOverrides,
) {
    let model_ref = model.borrow();
    let table_ref = table.borrow();
    let result = analyse_what_if(
        LAST_ROOM,
        overrides,
        model_ref.as_ref().expect("model must be loaded"),
        table_ref.as_ref().expect("table must be built"),
    );
    *outcome.borrow_mut() = Some(result);
}

#[when("the host of the last room adds wifi")]
fn add_wifi(
    model: &RefCell<Option<LinearReviewModel>>,
    table: &RefCell<Option<ClusterTable>>,
    outcome: &Outcome,
) {
    let overrides = AttributeOverrides {
        wifi: Some(true),
        ..AttributeOverrides::default()
    };
    analyse(model, table, outcome, &overrides);
}

#[when("the host of the last room changes nothing")]
fn change_nothing(
    model: &RefCell<Option<LinearReviewModel>>,
    table: &RefCell<Option<ClusterTable>>,
    outcome: &Outcome,
) {
    analyse(model, table, outcome, &AttributeOverrides::default());
}

fn analysed(outcome: &Outcome) -> WhatIfOutcome {
    match outcome.borrow().as_ref() {
        Some(Ok(analysed)) => analysed.clone(),
        Some(Err(err)) => panic!("analysis should succeed, got {err}"),
        None => panic!("analysis must run first"),
    }
}

#[then("the predicted score rises by {delta}")]
#[expect(clippy::float_arithmetic, reason = "assertions compare floats with a tolerance")]
fn score_rises(delta: f64, outcome: &Outcome) {
    let got = analysed(outcome).score_delta;
    assert!((got - delta).abs() < 1e-9, "delta {got}, want {delta}");
}

#[then("the star rating rises by {delta}")]
#[expect(clippy::float_arithmetic, reason = "assertions compare floats with a tolerance")]
fn stars_rise(delta: f64, outcome: &Outcome) {
    let got = analysed(outcome).star_delta;
    assert!((got - delta).abs() < 1e-9, "star delta {got}, want {delta}");
}

#[then("the rank improves by {points} points")]
fn rank_improves(points: i64, outcome: &Outcome) {
    assert_eq!(analysed(outcome).rank_change_points, points);
}

#[scenario(path = "tests/features/what_if.feature", index = 0)]
fn adding_wifi(
    model: RefCell<Option<LinearReviewModel>>,
    table: RefCell<Option<ClusterTable>>,
    outcome: Outcome,
) {
    let _ = (model, table, outcome);
}

#[scenario(path = "tests/features/what_if.feature", index = 1)]
fn unchanged_attributes(
    model: RefCell<Option<LinearReviewModel>>,
    table: RefCell<Option<ClusterTable>>,
    outcome: Outcome,
) {
    let _ = (model, table, outcome);
}
