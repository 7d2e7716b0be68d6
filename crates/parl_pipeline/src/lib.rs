//! parl_pipeline — deterministic run surface (entities → constraints → threshold → allocate → apply → compare).
//! This crate stays I/O-free: scenario files come pre-loaded from `parl_io`, the
//! math lives in `parl_algo`. Every stage is a plain function over owned data.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod allocate;
pub mod compare;
pub mod constraints;
pub mod scenario;

pub use allocate::{run_scenario, ScenarioOutcome};
pub use compare::{run_comparison, Comparison};
pub use constraints::{check_constraints, ConstraintAdvisory};
pub use scenario::{build_entities, ScenarioKind};

/// Single error surface for the pipeline orchestration.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("entity: {0}")]
    Core(#[from] parl_core::CoreError),

    #[error("allocate: {0}")]
    Allocate(#[from] parl_algo::AllocError),

    #[error("load: {0}")]
    Io(#[from] parl_io::IoError),

    /// Scenario data that passed loading but cannot be assembled (e.g. a coalition member vanished).
    #[error("scenario: {0}")]
    Scenario(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
