// crates/parl_cli/src/args.rs
//
// Offline CLI argument surface.
// - Scenario input is a local JSON file, or the bundled sample when omitted
// - No networked paths (reject any scheme:// like http/https/file)
// - Numeric overrides reject negatives with a readable message instead of a flag error
// - Output: --out dir (writes comparison.json), --render text|json on stdout

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use parl_core::Percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderKind {
    Text,
    Json,
}

/// Parsed CLI arguments.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "parl",
    version,
    disable_help_subcommand = true,
    about = "D'Hondt seat allocation: compare an election with and without coalitions"
)]
pub struct Args {
    /// Scenario JSON path (default: bundled sample election).
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Override the number of seats.
    #[arg(long, value_parser = parse_seats, allow_negative_numbers = true)]
    pub seats: Option<u32>,

    /// Override the valid-vote total used for thresholds and shares.
    #[arg(long, value_parser = parse_votes, allow_negative_numbers = true)]
    pub total_votes: Option<u64>,

    /// Override the entry threshold, in percent ("1.75" or "1.75%").
    #[arg(long, value_parser = parse_percent, allow_negative_numbers = true)]
    pub threshold: Option<Percent>,

    /// Report format on stdout.
    #[arg(long, value_enum, default_value_t = RenderKind::Text)]
    pub render: RenderKind,

    /// Directory to write comparison.json into.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Load and check the scenario, do not allocate.
    #[arg(long)]
    pub validate_only: bool,

    /// No log output and no status lines on stderr.
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug-level logs on stderr.
    #[arg(long)]
    pub verbose: bool,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local (no scheme): {p}"),
        }
    }
}
impl std::error::Error for CliError {}

fn parse_count(s: &str, what: &str) -> Result<i128, String> {
    let n: i128 = s.trim().parse().map_err(|_| format!("{what} must be an integer"))?;
    if n < 0 {
        return Err(format!("{what} must be >= 0, got {n}"));
    }
    Ok(n)
}

pub fn parse_seats(s: &str) -> Result<u32, String> {
    let n = parse_count(s, "seats")?;
    u32::try_from(n).map_err(|_| format!("seats must be <= {}", u32::MAX))
}

pub fn parse_votes(s: &str) -> Result<u64, String> {
    let n = parse_count(s, "total votes")?;
    u64::try_from(n).map_err(|_| format!("total votes must be <= {}", u64::MAX))
}

pub fn parse_percent(s: &str) -> Result<Percent, String> {
    s.parse::<Percent>()
        .map_err(|_| format!("threshold must be a percent in 0..=100 with at most two decimals, got {s:?}"))
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

/// Entry point used by main.rs. Clap usage errors exit with code 2 on their own.
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    for p in [args.scenario.as_deref(), args.out.as_deref()].into_iter().flatten() {
        ensure_local_path(p)?;
    }
    Ok(args)
}
