//! ENTITIES stage: turn a loaded scenario into the ordered entity list for one run.
//!
//! Without coalitions every party competes on its own, in file order. With
//! coalitions each coalition takes the slot of its first listed member and
//! its other members drop out; everyone else keeps their position. The input
//! order matters because it is the last tie-break in the allocator.

use std::collections::BTreeMap;
use std::fmt;

use parl_core::{Party, PartyId};
use parl_io::loader::{CoalitionSpec, ScenarioFile};

use crate::{PipelineError, PipelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScenarioKind {
    WithCoalitions,
    WithoutCoalitions,
}

impl ScenarioKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::WithCoalitions => "with_coalitions",
            ScenarioKind::WithoutCoalitions => "without_coalitions",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entities competing in a `kind` run of `file`, in allocation order. Seats are all 0.
pub fn build_entities(file: &ScenarioFile, kind: ScenarioKind) -> PipelineResult<Vec<Party>> {
    match kind {
        ScenarioKind::WithoutCoalitions => Ok(file.parties.clone()),
        ScenarioKind::WithCoalitions => with_coalitions(file),
    }
}

fn with_coalitions(file: &ScenarioFile) -> PipelineResult<Vec<Party>> {
    // member -> index of its coalition in `file.coalitions`
    let mut owner: BTreeMap<&PartyId, usize> = BTreeMap::new();
    for (ci, c) in file.coalitions.iter().enumerate() {
        for m in &c.members {
            owner.insert(m, ci);
        }
    }

    let mut placed = vec![false; file.coalitions.len()];
    let mut out = Vec::with_capacity(file.parties.len());
    for p in &file.parties {
        match owner.get(p.id()) {
            None => out.push(p.clone()),
            Some(&ci) if !placed[ci] => {
                out.push(merge(file, &file.coalitions[ci])?);
                placed[ci] = true;
            }
            Some(_) => {} // absorbed into an already placed coalition
        }
    }
    Ok(out)
}

fn merge(file: &ScenarioFile, spec: &CoalitionSpec) -> PipelineResult<Party> {
    let members = spec
        .members
        .iter()
        .map(|id| {
            file.party(id).ok_or_else(|| {
                PipelineError::Scenario(format!("coalition {} references unknown party {id}", spec.name))
            })
        })
        .collect::<PipelineResult<Vec<&Party>>>()?;
    Ok(Party::coalition(spec.name.as_str(), &members)?)
}
