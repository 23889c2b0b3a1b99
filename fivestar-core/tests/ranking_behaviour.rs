//! Behavioural coverage for peer ranking within a segment.
#![expect(
    clippy::expect_used,
    reason = "behaviour steps fail fast when scenario state is missing"
)]

use std::cell::RefCell;

use fivestar_core::{
    ClusterTable, HypotheticalMode, SegmentError, SegmentRank, rank, rank_hypothetical,
    test_support::ListingBuilder,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type Outcome = RefCell<Option<Result<SegmentRank, SegmentError>>>;

/// Cluster table shared by the steps of one scenario.
#[fixture]
pub fn table() -> RefCell<Option<ClusterTable>> {
    RefCell::new(None)
}

/// Ranking outcome captured for assertions.
#[fixture]
pub fn outcome() -> Outcome {
    RefCell::new(None)
}

fn install(table: &RefCell<Option<ClusterTable>>, scores: &[f64]) {
    let listings: Vec<_> = scores
        .iter()
        .zip(1..)
        .map(|(&score, id)| ListingBuilder::new(id).score(Some(score)).build())
        .collect();
    let built = ClusterTable::from_listings(&listings).expect("table builds");
    *table.borrow_mut() = Some(built);
}

fn record(
    table: &RefCell<Option<ClusterTable>>,
    outcome: &Outcome,
    compute: impl FnOnce(&ClusterTable) -> Result<SegmentRank, SegmentError>,
) {
    let binding = table.borrow();
    let built = binding.as_ref().expect("table must be built first");
    *outcome.borrow_mut() = Some(compute(built));
}

fn standing(outcome: &Outcome) -> SegmentRank {
    match outcome.borrow().as_ref() {
        Some(Ok(standing)) => *standing,
        Some(Err(err)) => panic!("ranking should succeed, got {err}"),
        None => panic!("ranking must run first"),
    }
}

#[given("a segment scoring 95, 95, 90, 80 and 70")]
fn five_scores(table: &RefCell<Option<ClusterTable>>) {
    install(table, &[95.0, 95.0, 90.0, 80.0, 70.0]);
}

#[given("a segment holding a single listing")]
fn single_listing(table: &RefCell<Option<ClusterTable>>) {
    install(table, &[88.0]);
}

#[when("I rank the listing scoring 90")]
fn rank_third(table: &RefCell<Option<ClusterTable>>, outcome: &Outcome) {
    record(table, outcome, |built| rank(3, built));
}

#[when("I rank the first listing scoring 95")]
fn rank_first(table: &RefCell<Option<ClusterTable>>, outcome: &Outcome) {
    record(table, outcome, |built| rank(1, built));
}

#[when("I rank that listing")]
fn rank_only(table: &RefCell<Option<ClusterTable>>, outcome: &Outcome) {
    record(table, outcome, |built| rank(1, built));
}

#[when("I rank a hypothetical 99 for the listing scoring 70")]
fn rank_hypothetical_best(table: &RefCell<Option<ClusterTable>>, outcome: &Outcome) {
    record(table, outcome, |built| {
        rank_hypothetical(5, 99.0, HypotheticalMode::Replace, built)
    });
}

#[then("the percentile is {expected}")]
#[expect(clippy::float_arithmetic, reason = "assertions compare floats with a tolerance")]
fn percentile_is(expected: f64, outcome: &Outcome) {
    let got = standing(outcome).percentile;
    assert!((got - expected).abs() < 1e-9, "percentile {got}, want {expected}");
}

#[then("the segment mean is {expected}")]
#[expect(clippy::float_arithmetic, reason = "assertions compare floats with a tolerance")]
fn mean_is(expected: f64, outcome: &Outcome) {
    let got = standing(outcome).segment_mean;
    assert!((got - expected).abs() < 1e-9, "mean {got}, want {expected}");
}

#[then("ranking fails because the segment has no peers")]
fn fails_empty(outcome: &Outcome) {
    let binding = outcome.borrow();
    assert!(matches!(
        binding.as_ref(),
        Some(Err(SegmentError::EmptySegment { .. }))
    ));
}

#[scenario(path = "tests/features/ranking.feature", index = 0)]
fn middle_of_segment(table: RefCell<Option<ClusterTable>>, outcome: Outcome) {
    let _ = (table, outcome);
}

#[scenario(path = "tests/features/ranking.feature", index = 1)]
fn tied_best(table: RefCell<Option<ClusterTable>>, outcome: Outcome) {
    let _ = (table, outcome);
}

#[scenario(path = "tests/features/ranking.feature", index = 2)]
fn no_peers(table: RefCell<Option<ClusterTable>>, outcome: Outcome) {
    let _ = (table, outcome);
}

#[scenario(path = "tests/features/ranking.feature", index = 3)]
fn hypothetical_replacement(table: RefCell<Option<ClusterTable>>, outcome: Outcome) {
    let _ = (table, outcome);
}
