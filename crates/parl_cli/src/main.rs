// crates/parl_cli/src/main.rs
//
// Run path: parse flags → logging → load scenario → overrides → domain check →
// (validate-only short-circuit) → comparison → render to stdout → optional comparison.json.

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    pub const VALIDATION: u8 = 2;
    pub const IO: u8 = 4;
    pub const SPEC: u8 = 5;
}

use std::process::ExitCode;

use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use args::{parse_and_validate as parse_cli, Args, RenderKind};
use parl_io::loader::{self, ScenarioFile};
use parl_io::IoError;
use parl_pipeline::{run_comparison, PipelineError};
use parl_report::ReportError;

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Scenario shape, domain or flag problems.
    Validation(String),
    /// Read/write/path errors.
    Io(String),
    /// Allocation or report invariants broken.
    Spec(String),
}

impl MainError {
    fn code(&self) -> u8 {
        match self {
            MainError::Validation(_) => exitcodes::VALIDATION,
            MainError::Io(_) => exitcodes::IO,
            MainError::Spec(_) => exitcodes::SPEC,
        }
    }
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Spec(m) => write!(f, "{m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("parl: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION);
        }
    };
    init_tracing(&args);

    match run(&args) {
        Ok(()) => ExitCode::from(exitcodes::OK),
        Err(e) => {
            eprintln!("parl: error: {e}");
            ExitCode::from(e.code())
        }
    }
}

fn init_tracing(args: &Args) {
    let filter = if args.quiet {
        EnvFilter::new("off")
    } else if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn run(args: &Args) -> Result<(), MainError> {
    let file = load(args)?;

    if args.validate_only {
        if !args.quiet {
            eprintln!(
                "validate-only: scenario OK ({} parties, {} coalitions)",
                file.parties.len(),
                file.coalitions.len()
            );
        }
        return Ok(());
    }

    let cmp = run_comparison(&file).map_err(map_pipeline_err)?;

    match args.render {
        RenderKind::Text => {
            let text = parl_report::render_text(&cmp).map_err(map_report_err)?;
            print!("{text}");
        }
        RenderKind::Json => print_json(&cmp)?,
    }

    if let Some(dir) = &args.out {
        write_out(dir, &cmp)?;
    }
    Ok(())
}

/// Scenario from disk (or the bundled sample) with flag overrides applied and re-checked.
fn load(args: &Args) -> Result<ScenarioFile, MainError> {
    let mut file = match &args.scenario {
        Some(path) => {
            info!(path = %path.display(), "loading scenario");
            loader::load_scenario_path(path)
        }
        None => {
            info!("using bundled sample election");
            loader::builtin_sample()
        }
    }
    .map_err(map_io_err)?;

    if let Some(seats) = args.seats {
        file.params.total_seats = seats;
    }
    if let Some(votes) = args.total_votes {
        file.params.total_votes = votes;
    }
    if let Some(threshold) = args.threshold {
        file.params.min_threshold = threshold;
    }
    parl_core::variables::validate_domains(&file.params)
        .map_err(|e| MainError::Validation(e.to_string()))?;
    debug!(params = ?file.params, "effective parameters");
    Ok(file)
}

#[cfg(feature = "report-json")]
fn print_json(cmp: &parl_pipeline::Comparison) -> Result<(), MainError> {
    let value = parl_report::render_json(cmp).map_err(map_report_err)?;
    let text = serde_json::to_string_pretty(&value).map_err(|e| MainError::Spec(e.to_string()))?;
    println!("{text}");
    Ok(())
}

#[cfg(not(feature = "report-json"))]
fn print_json(_: &parl_pipeline::Comparison) -> Result<(), MainError> {
    Err(MainError::Validation("built without JSON reporting".into()))
}

#[cfg(feature = "report-json")]
fn write_out(dir: &std::path::Path, cmp: &parl_pipeline::Comparison) -> Result<(), MainError> {
    let value = parl_report::render_json(cmp).map_err(map_report_err)?;
    let path = dir.join("comparison.json");
    parl_io::canonical_json::write_canonical_file(&path, &value).map_err(map_io_err)?;
    info!(path = %path.display(), "wrote comparison");
    Ok(())
}

#[cfg(not(feature = "report-json"))]
fn write_out(_: &std::path::Path, _: &parl_pipeline::Comparison) -> Result<(), MainError> {
    Err(MainError::Validation("built without JSON reporting".into()))
}

/// Translate parl_io::IoError into MainError buckets for exit-code mapping.
fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Path(m) => MainError::Io(m),
        IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        IoError::Invalid(m) => MainError::Validation(m),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Io(io) => map_io_err(io),
        PipelineError::Core(c) => MainError::Validation(c.to_string()),
        PipelineError::Scenario(m) => MainError::Validation(m),
        PipelineError::Allocate(a) => MainError::Spec(format!("allocate: {a}")),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    MainError::Spec(format!("report: {e}"))
}
