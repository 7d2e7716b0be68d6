//! JSON renderer.
//! The value mirrors `ComparisonReport` field for field; callers that write it
//! to disk go through `parl_io::canonical_json` for sorted keys.

use serde_json::Value;

use parl_pipeline::Comparison;

use crate::structure::build_report;
use crate::ReportError;

/// Full comparison report as a JSON value.
pub fn render_json(cmp: &Comparison) -> Result<Value, ReportError> {
    let report = build_report(cmp)?;
    serde_json::to_value(&report).map_err(|e| ReportError::Json(e.to_string()))
}
