//! Behaviour-driven step definitions driving the CLI scenarios.

use super::helpers::HackneyFiles;
use super::*;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

/// Aggregates CLI scenario state so each step only needs a single world
/// argument.
#[derive(Debug)]
struct CliWorld {
    files: HackneyFiles,
    pass_dataset: RefCell<bool>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CliWorld {
    fn new() -> Self {
        Self {
            files: HackneyFiles::new(),
            pass_dataset: RefCell::new(false),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn run(&self, command: &[String]) {
        let mut argv = vec!["fivestar".to_owned()];
        argv.extend(command.iter().cloned());
        if *self.pass_dataset.borrow() {
            argv.extend(self.files.dataset_flags());
        }
        let outcome = Cli::try_parse_from(argv)
            .map_err(CliError::from)
            .and_then(|cli| {
                let mut buffer = self.stdout.borrow_mut();
                dispatch(cli.command, &mut *buffer)
            });
        self.result.replace(Some(outcome));
    }

    fn output(&self) -> serde_json::Value {
        let borrowed = self.result.borrow();
        borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect("expected success");
        serde_json::from_slice(&self.stdout.borrow()).expect("stdout should hold JSON")
    }
}

#[fixture]
fn world() -> CliWorld {
    CliWorld::new()
}

#[given("a Hackney listing export exists on disk")]
fn export_exists(#[from(world)] world: &CliWorld) {
    assert!(world.files.listings().is_file());
    *world.pass_dataset.borrow_mut() = true;
}

#[given("I omit the listing export")]
fn omit_export(#[from(world)] world: &CliWorld) {
    *world.pass_dataset.borrow_mut() = false;
}

#[when("I rank listing {id}")]
fn rank_listing(#[from(world)] world: &CliWorld, id: u64) {
    world.run(&["rank".to_owned(), id.to_string()]);
}

#[when("I ask what adding wifi does for listing {id}")]
fn what_if_wifi(#[from(world)] world: &CliWorld, id: u64) {
    world.run(&[
        "what-if".to_owned(),
        id.to_string(),
        "--model".to_owned(),
        world.files.model().into_string(),
        "--wifi".to_owned(),
        "true".to_owned(),
    ]);
}

#[when("I write the cluster artefact")]
fn write_artefact(#[from(world)] world: &CliWorld) {
    world.run(&[
        "cluster".to_owned(),
        "--output".to_owned(),
        world.files.root().join("out/clusters.json").into_string(),
    ]);
}

#[then("the report shows a percentile of {percentile} and a segment mean of {mean}")]
fn report_shows_rank(#[from(world)] world: &CliWorld, percentile: f64, mean: f64) {
    let output = world.output();
    assert_eq!(output["percentile"].as_f64(), Some(percentile));
    assert_eq!(output["segment_mean"].as_f64(), Some(mean));
}

#[then("the report shows a rank change of {points} points")]
fn report_shows_rank_change(#[from(world)] world: &CliWorld, points: i64) {
    assert_eq!(world.output()["rank_change_points"].as_i64(), Some(points));
}

#[then("the artefact lists {listings} listings in {segments} segments")]
fn artefact_counts(#[from(world)] world: &CliWorld, listings: u64, segments: u64) {
    let output = world.output();
    assert_eq!(output["listings"].as_u64(), Some(listings));
    assert_eq!(output["segments"].as_u64(), Some(segments));
    assert!(world.files.root().join("out/clusters.json").is_file());
}

#[then("the CLI reports that the \"listings\" flag is missing")]
fn reports_missing_listings(#[from(world)] world: &CliWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_LISTINGS),
        other => panic!("unexpected error {other:?}"),
    }
}

macro_rules! register_cli_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/fivestar_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CliWorld) {
            let _ = world;
        }
    };
}

register_cli_scenario!(ranking_a_listing, "ranking a listing against its segment");
register_cli_scenario!(what_if_wifi_scenario, "predicting the effect of adding wifi");
register_cli_scenario!(writing_the_artefact, "writing the cluster artefact");
register_cli_scenario!(rejecting_missing_export, "rejecting a missing listing export");
