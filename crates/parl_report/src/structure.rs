//! crates/parl_report/src/structure.rs
//! Report data model + mappers from a pipeline `Comparison`.
//! No I/O, no re-allocation. Rows follow the entity order of the run unless noted.

use parl_core::{ElectionParams, Party, PartyId};
use parl_pipeline::{Comparison, ConstraintAdvisory, ScenarioKind, ScenarioOutcome};

use crate::metrics::{efficiency, mean_efficiency, pct, votes_per_seat, Advantage};
use crate::ReportError;

/// Fraction of a coalition's votes the separate-run heuristic credits to members.
const ESTIMATE_VOTE_FRACTION_NUM: u64 = 2; // 0.4 == 2/5
const ESTIMATE_VOTE_FRACTION_DEN: u64 = 5;
/// Assumed votes per seat for a small party running alone.
const ESTIMATE_VOTES_PER_SEAT: u64 = 25_000;

// -------------------- Model --------------------

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct ResultRow {
    pub name: PartyId,
    pub votes: u64,
    pub vote_pct: f64,
    pub seats: u32,
    pub seat_pct: f64,
    pub votes_per_seat: f64,
    pub efficiency: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct ComparisonRow {
    pub name: PartyId,
    pub seats_with: u32,
    pub seats_without: u32,
    pub difference: i64,
    pub advantage: Advantage,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct Summary {
    pub seats_with: u32,
    pub seats_without: u32,
    pub entities_with: usize,
    pub entities_without: usize,
    pub mean_efficiency_with: f64,
    pub mean_efficiency_without: f64,
}

/// Seats a coalition won together vs what its members won apart.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct CoalitionImpact {
    pub coalition: PartyId,
    pub members: Vec<PartyId>,
    pub seats_as_coalition: u32,
    pub seats_separately: u32,
    /// `seats_as_coalition - seats_separately`.
    pub net: i64,
    pub advantageous: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct ThresholdEffect {
    pub threshold_votes: u64,
    /// Below the threshold and seatless, in run order.
    pub excluded_with: Vec<PartyId>,
    pub excluded_without: Vec<PartyId>,
}

impl ThresholdEffect {
    /// Coalitions changed how many entities fall under the threshold.
    pub fn coalitions_matter(&self) -> bool {
        self.excluded_with.len() != self.excluded_without.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct BiasReport {
    pub scenario: &'static str,
    /// Mean efficiency of the two largest entities by votes (seated ones only).
    pub top_two: f64,
    /// Mean efficiency of every other seated entity.
    pub rest: f64,
}

impl BiasReport {
    pub fn favours_large(&self) -> bool {
        self.top_two > self.rest
    }
}

/// Non-normative guess at a coalition's seats had its members run alone.
/// Not a D'Hondt result; the real figure is `CoalitionImpact::seats_separately`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct SeparateEstimate {
    pub coalition: PartyId,
    pub estimate: u32,
    pub seats_as_coalition: u32,
    /// `seats_as_coalition - estimate`.
    pub vs_estimate: i64,
    pub illustrative: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct ComparisonReport {
    pub params: ParamsEcho,
    pub advisory_with: AdvisoryEcho,
    pub advisory_without: AdvisoryEcho,
    pub results_with: Vec<ResultRow>,
    pub results_without: Vec<ResultRow>,
    pub comparison: Vec<ComparisonRow>,
    pub summary: Summary,
    pub coalition_impact: Vec<CoalitionImpact>,
    pub threshold_effect: ThresholdEffect,
    pub bias: Vec<BiasReport>,
    pub estimates: Vec<SeparateEstimate>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct ParamsEcho {
    pub total_seats: u32,
    pub total_votes: u64,
    pub min_threshold_pct: f64,
    pub max_vote_share_pct: f64,
    pub max_top_two_gap_pct: f64,
}

impl From<&ElectionParams> for ParamsEcho {
    fn from(p: &ElectionParams) -> Self {
        ParamsEcho {
            total_seats: p.total_seats,
            total_votes: p.total_votes,
            min_threshold_pct: p.min_threshold.as_f64(),
            max_vote_share_pct: p.max_vote_share.as_f64(),
            max_top_two_gap_pct: p.max_top_two_gap.as_f64(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct AdvisoryEcho {
    pub min_votes: u64,
    pub max_votes: u64,
    pub max_gap_votes: u64,
    pub top_two: Option<(PartyId, PartyId)>,
    pub top_two_gap: u64,
    pub max_share_exceeded: bool,
    pub top_two_gap_exceeded: bool,
}

impl From<&ConstraintAdvisory> for AdvisoryEcho {
    fn from(a: &ConstraintAdvisory) -> Self {
        AdvisoryEcho {
            min_votes: a.min_votes,
            max_votes: a.max_votes,
            max_gap_votes: a.max_gap_votes,
            top_two: a.top_two.as_ref().map(|(x, y)| (x.id.clone(), y.id.clone())),
            top_two_gap: a.top_two_gap(),
            max_share_exceeded: a.max_share_exceeded,
            top_two_gap_exceeded: a.top_two_gap_exceeded,
        }
    }
}

// -------------------- Mappers --------------------

/// Seated entities, seats descending (ties keep run order).
pub fn results_table(outcome: &ScenarioOutcome) -> Vec<ResultRow> {
    let params = &outcome.params;
    let mut seated: Vec<&Party> = outcome.seated().collect();
    seated.sort_by(|a, b| b.seats().cmp(&a.seats()));
    seated
        .into_iter()
        .map(|p| ResultRow {
            name: p.id().clone(),
            votes: p.votes(),
            vote_pct: pct(p.votes(), params.total_votes),
            seats: p.seats(),
            seat_pct: pct(p.seats() as u64, params.total_seats as u64),
            votes_per_seat: votes_per_seat(p).unwrap_or(0.0),
            efficiency: efficiency(p, params),
        })
        .collect()
}

/// One row per entity of the coalition run; the other side is looked up by name (0 if absent).
pub fn comparison_rows(cmp: &Comparison) -> Vec<ComparisonRow> {
    cmp.with
        .entities
        .iter()
        .map(|p| {
            let seats_with = p.seats();
            let seats_without = cmp.without.seats_of(p.name());
            let difference = seats_with as i64 - seats_without as i64;
            ComparisonRow {
                name: p.id().clone(),
                seats_with,
                seats_without,
                difference,
                advantage: Advantage::from_difference(difference),
            }
        })
        .collect()
}

pub fn summary(cmp: &Comparison) -> Summary {
    Summary {
        seats_with: cmp.with.total_seats_awarded(),
        seats_without: cmp.without.total_seats_awarded(),
        entities_with: cmp.with.entities.len(),
        entities_without: cmp.without.entities.len(),
        mean_efficiency_with: mean_efficiency(&cmp.with.entities, &cmp.with.params),
        mean_efficiency_without: mean_efficiency(&cmp.without.entities, &cmp.without.params),
    }
}

/// Every coalition of the "with" run against its members' seats in the "without" run.
pub fn coalition_impact(cmp: &Comparison) -> Vec<CoalitionImpact> {
    cmp.with
        .entities
        .iter()
        .filter(|p| p.is_coalition())
        .map(|c| {
            let seats_separately: u32 = c.members().iter().map(|m| cmp.without.seats_of(m.as_str())).sum();
            let net = c.seats() as i64 - seats_separately as i64;
            CoalitionImpact {
                coalition: c.id().clone(),
                members: c.members().to_vec(),
                seats_as_coalition: c.seats(),
                seats_separately,
                net,
                advantageous: net > 0,
            }
        })
        .collect()
}

pub fn threshold_effect(cmp: &Comparison) -> ThresholdEffect {
    let excluded = |o: &ScenarioOutcome| -> Vec<PartyId> {
        o.below_threshold()
            .filter(|p| p.seats() == 0)
            .map(|p| p.id().clone())
            .collect()
    };
    ThresholdEffect {
        threshold_votes: cmp.with.min_votes,
        excluded_with: excluded(&cmp.with),
        excluded_without: excluded(&cmp.without),
    }
}

/// Two largest entities by votes vs the rest. Seatless entities count towards
/// neither mean but still occupy their rank.
pub fn big_party_bias(outcome: &ScenarioOutcome) -> BiasReport {
    let mut by_votes: Vec<&Party> = outcome.entities.iter().collect();
    by_votes.sort_by(|a, b| b.votes().cmp(&a.votes()));
    let split = by_votes.len().min(2);
    let (top, rest) = by_votes.split_at(split);
    BiasReport {
        scenario: outcome.kind.as_str(),
        top_two: mean_efficiency(top.iter().copied(), &outcome.params),
        rest: mean_efficiency(rest.iter().copied(), &outcome.params),
    }
}

/// `max(1, Σ_members floor(votes * 0.4 / n / 25 000))` over the coalition's own votes.
///
/// A rough rule of thumb, kept for comparison with the real separate run.
/// Simple parties get `None`.
pub fn illustrative_separate_estimate(coalition: &Party) -> Option<SeparateEstimate> {
    if !coalition.is_coalition() {
        return None;
    }
    let n = coalition.members().len() as u64;
    let per_member = (coalition.votes() as u128 * ESTIMATE_VOTE_FRACTION_NUM as u128)
        / (ESTIMATE_VOTE_FRACTION_DEN as u128 * n as u128 * ESTIMATE_VOTES_PER_SEAT as u128);
    let total = per_member.saturating_mul(n as u128);
    let estimate = u32::try_from(total).unwrap_or(u32::MAX).max(1);
    Some(SeparateEstimate {
        coalition: coalition.id().clone(),
        estimate,
        seats_as_coalition: coalition.seats(),
        vs_estimate: coalition.seats() as i64 - estimate as i64,
        illustrative: true,
    })
}

/// Assemble every section. Both runs must share their parameters.
pub fn build_report(cmp: &Comparison) -> Result<ComparisonReport, ReportError> {
    if cmp.with.params != cmp.without.params {
        return Err(ReportError::Inconsistent("scenarios ran with different parameters"));
    }
    if cmp.with.kind != ScenarioKind::WithCoalitions || cmp.without.kind != ScenarioKind::WithoutCoalitions {
        return Err(ReportError::Inconsistent("scenario kinds swapped"));
    }
    Ok(ComparisonReport {
        params: ParamsEcho::from(&cmp.with.params),
        advisory_with: AdvisoryEcho::from(&cmp.with.advisory),
        advisory_without: AdvisoryEcho::from(&cmp.without.advisory),
        results_with: results_table(&cmp.with),
        results_without: results_table(&cmp.without),
        comparison: comparison_rows(cmp),
        summary: summary(cmp),
        coalition_impact: coalition_impact(cmp),
        threshold_effect: threshold_effect(cmp),
        bias: vec![big_party_bias(&cmp.with), big_party_bias(&cmp.without)],
        estimates: cmp.with.entities.iter().filter_map(illustrative_separate_estimate).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parl_pipeline::run_comparison;

    fn sample() -> Comparison {
        run_comparison(&parl_io::loader::builtin_sample().unwrap()).unwrap()
    }

    fn names(rows: &[ResultRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn results_sorted_by_seats() {
        let cmp = sample();
        let rows = results_table(&cmp.with);
        assert_eq!(names(&rows), ["AD", "PS", "CH", "IL", "BE", "PCP", "L", "PAN"]);
        let ad = &rows[0];
        assert_eq!((ad.votes, ad.seats), (1_970_000, 71));
        assert!((ad.seat_pct - 30.869565).abs() < 1e-5);
        assert!((ad.vote_pct - 32.833333).abs() < 1e-5);
        assert!((ad.votes_per_seat - 27_746.478873).abs() < 1e-5);
    }

    #[test]
    fn comparison_rows_follow_the_coalition_run() {
        let rows = comparison_rows(&sample());
        let got: Vec<(&str, u32, u32, i64)> = rows
            .iter()
            .map(|r| (r.name.as_str(), r.seats_with, r.seats_without, r.difference))
            .collect();
        assert_eq!(
            got,
            [
                ("PS", 67, 67, 0),
                ("AD", 71, 0, 71),
                ("CH", 31, 31, 0),
                ("IL", 15, 15, 0),
                ("BE", 13, 13, 0),
                ("PCP", 12, 12, 0),
                ("L", 11, 11, 0),
                ("PAN", 10, 10, 0),
            ]
        );
        assert_eq!(rows[1].advantage, Advantage::Gain(71));
        assert_eq!(rows[0].advantage, Advantage::Unchanged);
    }

    #[test]
    fn summary_totals() {
        let s = summary(&sample());
        assert_eq!((s.seats_with, s.seats_without), (230, 230));
        assert_eq!((s.entities_with, s.entities_without), (8, 9));
        assert!(s.mean_efficiency_with > 0.0 && s.mean_efficiency_without > 0.0);
    }

    #[test]
    fn coalition_impact_is_a_difference() {
        let impact = coalition_impact(&sample());
        assert_eq!(impact.len(), 1);
        let ad = &impact[0];
        assert_eq!(ad.coalition.as_str(), "AD");
        // PSD 66 + CDS 5 apart, 71 together
        assert_eq!((ad.seats_as_coalition, ad.seats_separately, ad.net), (71, 71, 0));
        assert!(!ad.advantageous);
    }

    #[test]
    fn threshold_effect_on_sample_is_empty() {
        let t = threshold_effect(&sample());
        assert_eq!(t.threshold_votes, 105_000);
        assert!(t.excluded_with.is_empty() && t.excluded_without.is_empty());
        assert!(!t.coalitions_matter());
    }

    #[test]
    fn threshold_effect_counts_excluded() {
        let file = parl_io::loader::parse_scenario_str(
            r#"{"params":{"total_seats":10,"total_votes":1000,"min_threshold_pct":5},
                "parties":[{"name":"A","votes":600},{"name":"B","votes":30},{"name":"C","votes":30},{"name":"D","votes":340}],
                "coalitions":[{"name":"BC","members":["B","C"]}]}"#,
        )
        .unwrap();
        let t = threshold_effect(&run_comparison(&file).unwrap());
        assert_eq!(t.threshold_votes, 50);
        assert!(t.excluded_with.is_empty());
        let without: Vec<&str> = t.excluded_without.iter().map(PartyId::as_str).collect();
        assert_eq!(without, ["B", "C"]);
        assert!(t.coalitions_matter());
    }

    #[test]
    fn bias_compares_top_two_with_rest() {
        let cmp = sample();
        let b = big_party_bias(&cmp.without);
        assert_eq!(b.scenario, "without_coalitions");
        assert!(b.top_two > 0.0 && b.rest > 0.0);
        assert!(b.favours_large());
    }

    #[test]
    fn estimate_heuristic() {
        let cmp = sample();
        let ad = cmp.with.entity("AD").unwrap();
        let est = illustrative_separate_estimate(ad).unwrap();
        // 2 * floor(1_970_000 * 0.4 / 2 / 25_000) = 2 * 15
        assert_eq!(est.estimate, 30);
        assert_eq!(est.vs_estimate, 41);
        assert!(est.illustrative);
        assert!(illustrative_separate_estimate(cmp.with.entity("PS").unwrap()).is_none());

        let a = Party::simple("A", 10).unwrap();
        let b = Party::simple("B", 10).unwrap();
        let tiny = Party::coalition("T", &[&a, &b]).unwrap();
        assert_eq!(illustrative_separate_estimate(&tiny).unwrap().estimate, 1);
    }

    #[test]
    fn build_report_rejects_mismatched_params() {
        let mut cmp = sample();
        assert!(build_report(&cmp).is_ok());
        cmp.without.params.total_seats = 229;
        assert_eq!(
            build_report(&cmp).unwrap_err(),
            ReportError::Inconsistent("scenarios ran with different parameters")
        );
    }
}
