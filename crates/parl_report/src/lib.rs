//! parl_report — pure offline comparison report + renderers (text/JSON).
//!
//! Determinism rules:
//! - No I/O here. Callers pass a finished `Comparison` from parl_pipeline.
//! - Stable row order: seats desc for result tables, run order elsewhere.
//! - Ratios are presentation only; nothing here feeds back into allocation.

#![deny(unsafe_code)]

use std::fmt;

pub mod metrics;
pub mod render_text;
pub mod structure;

#[cfg(feature = "render_json")]
pub mod render_json;

pub use metrics::{efficiency, mean_efficiency, votes_per_seat, Advantage};
pub use render_text::render_text;
pub use structure::{
    big_party_bias, build_report, coalition_impact, comparison_rows, illustrative_separate_estimate,
    results_table, summary, threshold_effect, BiasReport, CoalitionImpact, ComparisonReport,
    ComparisonRow, ResultRow, SeparateEstimate, Summary, ThresholdEffect,
};

#[cfg(feature = "render_json")]
pub use render_json::render_json;

// ===== Errors =====
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Writing into the output buffer failed.
    Format,
    /// The two scenarios of a comparison disagree on something they must share.
    Inconsistent(&'static str),
    #[cfg(feature = "render_json")]
    Json(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Format => f.write_str("report formatting failed"),
            ReportError::Inconsistent(what) => write!(f, "inconsistent comparison: {what}"),
            #[cfg(feature = "render_json")]
            ReportError::Json(m) => write!(f, "report json: {m}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<fmt::Error> for ReportError {
    fn from(_: fmt::Error) -> Self {
        ReportError::Format
    }
}
