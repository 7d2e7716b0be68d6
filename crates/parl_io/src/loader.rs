//! Loader: read a scenario JSON file, check it, and return a typed
//! `ScenarioFile` for the pipeline. No network I/O.
//!
//! Wire shape:
//! ```json
//! { "params": { "total_seats": 230, "total_votes": 6000000, "min_threshold_pct": 1.75 },
//!   "parties": [ { "name": "PS", "votes": 1850000 } ],
//!   "coalitions": [ { "name": "AD", "members": ["PSD", "CDS"] } ] }
//! ```
//! Counts are read as signed integers so that negative values surface as
//! `IoError::Invalid` with the offending field named.

#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use parl_core::{variables, ElectionParams, Party, PartyId, Percent};

use crate::{IoError, IoResult};

const SAMPLE_ELECTION: &str = include_str!("../fixtures/sample_election.json");

/// Upper bound on scenario file size.
const MAX_SCENARIO_BYTES: u64 = 4 * 1024 * 1024;

// ----------------------------- Wire-facing types -----------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawParams {
    total_seats: Option<i64>,
    total_votes: Option<i64>,
    min_threshold_pct: Option<Percent>,
    max_vote_share_pct: Option<Percent>,
    max_top_two_gap_pct: Option<Percent>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawParty {
    name: String,
    votes: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCoalition {
    name: String,
    members: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScenario {
    #[serde(default)]
    params: RawParams,
    parties: Vec<RawParty>,
    #[serde(default)]
    coalitions: Vec<RawCoalition>,
}

// ----------------------------- Typed output -----------------------------

/// A declared coalition: its name and the declared parties it merges, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoalitionSpec {
    pub name: PartyId,
    pub members: Vec<PartyId>,
}

/// Loaded, validated scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioFile {
    pub params: ElectionParams,
    /// Every party running on its own, in file order.
    pub parties: Vec<Party>,
    pub coalitions: Vec<CoalitionSpec>,
}

impl ScenarioFile {
    pub fn party(&self, id: &PartyId) -> Option<&Party> {
        self.parties.iter().find(|p| p.id() == id)
    }
}

// ----------------------------- Entry points -----------------------------

/// Load a scenario from a local file.
pub fn load_scenario_path(path: &Path) -> IoResult<ScenarioFile> {
    let meta = fs::metadata(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    if !meta.is_file() {
        return Err(IoError::Path(format!("{}: not a regular file", path.display())));
    }
    if meta.len() > MAX_SCENARIO_BYTES {
        return Err(IoError::Path(format!(
            "{}: larger than {MAX_SCENARIO_BYTES} bytes",
            path.display()
        )));
    }
    let text = fs::read_to_string(path)?;
    parse_scenario_str(&text)
}

/// Parse and validate scenario JSON text.
pub fn parse_scenario_str(text: &str) -> IoResult<ScenarioFile> {
    let raw: RawScenario = serde_json::from_str(text)?;
    scenario_from_raw(raw)
}

/// The bundled sample election (nine parties, one coalition).
pub fn builtin_sample() -> IoResult<ScenarioFile> {
    parse_scenario_str(SAMPLE_ELECTION)
}

// ----------------------------- Validation -----------------------------

fn scenario_from_raw(raw: RawScenario) -> IoResult<ScenarioFile> {
    let params = params_from_raw(&raw.params)?;

    let mut parties: Vec<Party> = Vec::with_capacity(raw.parties.len());
    let mut seen: BTreeSet<PartyId> = BTreeSet::new();
    for (i, rp) in raw.parties.iter().enumerate() {
        let id = parse_name(&rp.name, &format!("/parties/{i}/name"))?;
        let votes = non_negative(rp.votes, &format!("/parties/{i}/votes"))?;
        if !seen.insert(id.clone()) {
            return Err(IoError::Invalid(format!("duplicate party name {id}")));
        }
        parties.push(Party::with_id(id, votes));
    }

    // member -> coalition that claimed it
    let mut claimed: BTreeMap<PartyId, PartyId> = BTreeMap::new();
    let mut coalitions: Vec<CoalitionSpec> = Vec::with_capacity(raw.coalitions.len());
    for (i, rc) in raw.coalitions.iter().enumerate() {
        let name = parse_name(&rc.name, &format!("/coalitions/{i}/name"))?;
        if !seen.insert(name.clone()) {
            return Err(IoError::Invalid(format!(
                "coalition name {name} collides with another party or coalition"
            )));
        }
        if rc.members.is_empty() {
            return Err(IoError::Invalid(format!("coalition {name} has no members")));
        }

        let mut members = Vec::with_capacity(rc.members.len());
        for (j, m) in rc.members.iter().enumerate() {
            let id = parse_name(m, &format!("/coalitions/{i}/members/{j}"))?;
            if !parties.iter().any(|p| p.id() == &id) {
                return Err(IoError::Invalid(format!(
                    "coalition {name} references unknown party {id}"
                )));
            }
            if let Some(prev) = claimed.insert(id.clone(), name.clone()) {
                return Err(IoError::Invalid(format!(
                    "party {id} belongs to both {prev} and {name}"
                )));
            }
            members.push(id);
        }
        coalitions.push(CoalitionSpec { name, members });
    }

    Ok(ScenarioFile { params, parties, coalitions })
}

fn params_from_raw(raw: &RawParams) -> IoResult<ElectionParams> {
    let defaults = ElectionParams::default();
    let total_seats = match raw.total_seats {
        Some(n) => u32::try_from(n).map_err(|_| {
            IoError::Invalid(format!("/params/total_seats: expected 0..={}, got {n}", u32::MAX))
        })?,
        None => defaults.total_seats,
    };
    let total_votes = match raw.total_votes {
        Some(n) => non_negative(n, "/params/total_votes")?,
        None => defaults.total_votes,
    };
    let params = ElectionParams {
        total_seats,
        total_votes,
        min_threshold: raw.min_threshold_pct.unwrap_or(defaults.min_threshold),
        max_vote_share: raw.max_vote_share_pct.unwrap_or(defaults.max_vote_share),
        max_top_two_gap: raw.max_top_two_gap_pct.unwrap_or(defaults.max_top_two_gap),
    };
    variables::validate_domains(&params).map_err(|e| IoError::Invalid(format!("/params: {e}")))?;
    Ok(params)
}

fn parse_name(s: &str, pointer: &str) -> IoResult<PartyId> {
    s.parse()
        .map_err(|e| IoError::Invalid(format!("{pointer}: {e} ({s:?})")))
}

fn non_negative(n: i64, pointer: &str) -> IoResult<u64> {
    u64::try_from(n).map_err(|_| IoError::Invalid(format!("{pointer}: must be >= 0, got {n}")))
}
