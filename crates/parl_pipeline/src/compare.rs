//! COMPARE stage: the same election run twice, with and without declared coalitions.

use parl_io::loader::ScenarioFile;
use tracing::debug;

use crate::allocate::{run_scenario, ScenarioOutcome};
use crate::scenario::ScenarioKind;
use crate::PipelineResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub with: ScenarioOutcome,
    pub without: ScenarioOutcome,
}

impl Comparison {
    pub fn outcome(&self, kind: ScenarioKind) -> &ScenarioOutcome {
        match kind {
            ScenarioKind::WithCoalitions => &self.with,
            ScenarioKind::WithoutCoalitions => &self.without,
        }
    }
}

/// Both scenarios over the same params. Runs are independent: no state is shared.
pub fn run_comparison(file: &ScenarioFile) -> PipelineResult<Comparison> {
    debug!(coalitions = file.coalitions.len(), "comparison start");
    let with = run_scenario(file, ScenarioKind::WithCoalitions)?;
    let without = run_scenario(file, ScenarioKind::WithoutCoalitions)?;
    Ok(Comparison { with, without })
}
