//! ALLOCATE stage: one complete run for a scenario kind.
//!
//! Order of work:
//! 1. build the entity list (`scenario::build_entities`);
//! 2. constraint advisory (no effect on the result);
//! 3. absolute entry threshold from `params.min_threshold`;
//! 4. D'Hondt over all entities (ineligible ones stay at 0);
//! 5. write seats back onto the entities.

use parl_algo::{allocate, apply_allocation, minimum_vote_threshold, Allocation};
use parl_core::{ElectionParams, Party};
use parl_io::loader::ScenarioFile;
use tracing::{debug, info};

use crate::constraints::{check_constraints, ConstraintAdvisory};
use crate::scenario::{build_entities, ScenarioKind};
use crate::PipelineResult;

/// Everything produced by one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub kind: ScenarioKind,
    pub params: ElectionParams,
    /// Competing entities in allocation order, seats applied.
    pub entities: Vec<Party>,
    pub allocation: Allocation,
    pub advisory: ConstraintAdvisory,
    /// Entry threshold in votes used for this run.
    pub min_votes: u64,
}

impl ScenarioOutcome {
    /// Entity by name.
    pub fn entity(&self, name: &str) -> Option<&Party> {
        self.entities.iter().find(|p| p.name() == name)
    }

    /// Seats won by `name` (0 when absent).
    pub fn seats_of(&self, name: &str) -> u32 {
        self.entity(name).map(Party::seats).unwrap_or(0)
    }

    pub fn total_seats_awarded(&self) -> u32 {
        self.allocation.total()
    }

    pub fn seated(&self) -> impl Iterator<Item = &Party> {
        self.entities.iter().filter(|p| p.seats() > 0)
    }

    pub fn below_threshold(&self) -> impl Iterator<Item = &Party> {
        self.entities.iter().filter(move |p| p.votes() < self.min_votes)
    }
}

/// Run `kind` for `file` end to end.
pub fn run_scenario(file: &ScenarioFile, kind: ScenarioKind) -> PipelineResult<ScenarioOutcome> {
    let params = file.params;
    info!(scenario = %kind, seats = params.total_seats, total_votes = params.total_votes, "run start");

    let mut entities = build_entities(file, kind)?;
    let advisory = check_constraints(&entities, &params);

    let min_votes = minimum_vote_threshold(params.total_votes, params.min_threshold);
    debug!(scenario = %kind, min_votes, threshold = %params.min_threshold, "entry threshold");

    let allocation = allocate(&entities, params.total_seats, min_votes)?;
    apply_allocation(&mut entities, &allocation);

    for p in &entities {
        debug!(scenario = %kind, party = %p.id(), votes = p.votes(), seats = p.seats(), "seats");
    }
    info!(scenario = %kind, awarded = allocation.total(), entities = entities.len(), "run done");

    Ok(ScenarioOutcome { kind, params, entities, allocation, advisory, min_votes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parl_io::loader::parse_scenario_str;

    #[test]
    fn small_race() {
        let file = parse_scenario_str(
            r#"{"params":{"total_seats":6,"total_votes":600,"min_threshold_pct":0},
                "parties":[{"name":"A","votes":300},{"name":"B","votes":200},{"name":"C","votes":100}]}"#,
        )
        .unwrap();
        let out = run_scenario(&file, ScenarioKind::WithoutCoalitions).unwrap();
        assert_eq!(out.min_votes, 0);
        assert_eq!((out.seats_of("A"), out.seats_of("B"), out.seats_of("C")), (3, 2, 1));
        assert_eq!(out.total_seats_awarded(), 6);
    }

    #[test]
    fn threshold_from_params() {
        // 45 % of 100 votes = 45
        let file = parse_scenario_str(
            r#"{"params":{"total_seats":5,"total_votes":100,"min_threshold_pct":45},
                "parties":[{"name":"A","votes":100},{"name":"B","votes":50},{"name":"C","votes":40}]}"#,
        )
        .unwrap();
        let out = run_scenario(&file, ScenarioKind::WithoutCoalitions).unwrap();
        assert_eq!(out.min_votes, 45);
        assert_eq!((out.seats_of("A"), out.seats_of("B"), out.seats_of("C")), (3, 2, 0));
        let below: Vec<&str> = out.below_threshold().map(Party::name).collect();
        assert_eq!(below, ["C"]);
        assert_eq!(out.seated().count(), 2);
    }

    #[test]
    fn nobody_eligible_awards_nothing() {
        let file = parse_scenario_str(
            r#"{"params":{"total_seats":5,"total_votes":1000,"min_threshold_pct":50},
                "parties":[{"name":"A","votes":10}]}"#,
        )
        .unwrap();
        let out = run_scenario(&file, ScenarioKind::WithoutCoalitions).unwrap();
        assert_eq!(out.total_seats_awarded(), 0);
        assert_eq!(out.seats_of("A"), 0);
    }
}
