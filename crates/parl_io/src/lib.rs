//! crates/parl_io/src/lib.rs
//! Minimal I/O crate for the seat simulator.
//!
//! - `loader`: scenario JSON → typed, validated `ScenarioFile`.
//! - `canonical_json`: sorted-key compact JSON, atomic file writes.
//! - Shared error type (`IoError`) with `From` conversions used across modules.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for parl_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, create_dir_all, rename, ...).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON syntax or shape errors, with a JSON Pointer when known.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Well-formed input that breaks a scenario rule (negative votes, unknown member, ...).
    #[error("invalid input: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports line/column, not a pointer.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

pub mod canonical_json;
pub mod loader;

pub mod prelude {
    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
    pub use crate::loader::{builtin_sample, load_scenario_path, parse_scenario_str, CoalitionSpec, ScenarioFile};
    pub use crate::{IoError, IoResult};
}
