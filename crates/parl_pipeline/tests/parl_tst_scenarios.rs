//! End-to-end runs of the bundled sample election (230 seats, 6 000 000 votes, 1.75 %).

use parl_io::loader::{builtin_sample, load_scenario_path};
use parl_pipeline::{run_comparison, run_scenario, ScenarioKind};

fn seats(out: &parl_pipeline::ScenarioOutcome, names: &[&str]) -> Vec<u32> {
    names.iter().map(|n| out.seats_of(n)).collect()
}

#[test]
fn with_coalition_seats() {
    let file = builtin_sample().unwrap();
    let out = run_scenario(&file, ScenarioKind::WithCoalitions).unwrap();

    assert_eq!(out.min_votes, 105_000);
    assert_eq!(out.entity("AD").unwrap().votes(), 1_970_000);
    assert_eq!(
        seats(&out, &["PS", "AD", "CH", "IL", "BE", "PCP", "L", "PAN"]),
        [67, 71, 31, 15, 13, 12, 11, 10]
    );
    assert_eq!(out.total_seats_awarded(), 230);
    assert!(out.entity("PSD").is_none() && out.entity("CDS").is_none());
}

#[test]
fn without_coalition_seats() {
    let file = builtin_sample().unwrap();
    let out = run_scenario(&file, ScenarioKind::WithoutCoalitions).unwrap();
    assert_eq!(
        seats(&out, &["PS", "PSD", "CH", "IL", "BE", "PCP", "L", "PAN", "CDS"]),
        [67, 66, 31, 15, 13, 12, 11, 10, 5]
    );
    assert_eq!(out.total_seats_awarded(), 230);
}

#[test]
fn every_entity_clears_the_sample_threshold() {
    let cmp = run_comparison(&builtin_sample().unwrap()).unwrap();
    assert_eq!(cmp.with.below_threshold().count(), 0);
    assert_eq!(cmp.without.below_threshold().count(), 0);
}

#[test]
fn advisory_flags_only_the_coalition_gap() {
    let cmp = run_comparison(&builtin_sample().unwrap()).unwrap();

    let with = &cmp.with.advisory;
    let (first, second) = with.top_two.as_ref().unwrap();
    assert_eq!((first.id.as_str(), second.id.as_str()), ("AD", "PS"));
    assert_eq!(with.top_two_gap(), 120_000);
    assert!(with.top_two_gap_exceeded);
    assert!(!with.max_share_exceeded);

    let without = &cmp.without.advisory;
    assert_eq!(without.top_two_gap(), 30_000);
    assert!(!without.any_flag());

    // advisory never touches votes
    assert_eq!(cmp.with.entity("AD").unwrap().votes(), 1_970_000);
}

#[test]
fn divisors_match_seat_counts() {
    let out = run_scenario(&builtin_sample().unwrap(), ScenarioKind::WithCoalitions).unwrap();
    for p in &out.entities {
        let expect: Vec<u32> = (1..=p.seats()).collect();
        assert_eq!(out.allocation.divisors_for(p.id()), expect, "{}", p.name());
    }
}

#[test]
fn repeated_comparisons_are_identical() {
    let file = builtin_sample().unwrap();
    assert_eq!(run_comparison(&file).unwrap(), run_comparison(&file).unwrap());
}

#[test]
fn scenario_from_disk_matches_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.json");
    std::fs::write(&path, include_str!("../../parl_io/fixtures/sample_election.json")).unwrap();
    let from_disk = load_scenario_path(&path).unwrap();
    assert_eq!(from_disk, builtin_sample().unwrap());
    assert_eq!(run_comparison(&from_disk).unwrap(), run_comparison(&builtin_sample().unwrap()).unwrap());
}
