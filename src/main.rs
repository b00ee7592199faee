mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::input::extract::extract_file;
use crate::input::{InputError, PitchDataset, load_dataset};
use crate::model::thresholds::{
    AnalysisConfig, CategoryScheme, DegeneratePolicy, SchemeError, SchemeKind,
};
use crate::pipeline::stage4_interval::SMALL_SAMPLE_N;
use crate::pipeline::stage6_report::{render_console, write_reports};
use crate::pipeline::{AgreementError, CriterionAnalysis, analyze_criterion};
use crate::report::ReportContext;

const TOOL_NAME: &str = "pitch-irr";

#[derive(Debug, Parser)]
#[command(
    name = "pitch-irr",
    version,
    about = "Cohen's kappa agreement between Pista and Winds2Ventures pitch ratings"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the agreement analysis and print the report.
    Analyze(AnalyzeArgs),
    /// Pull overall and investibility scores out of a plain-text report.
    Extract(ExtractArgs),
}

#[derive(Debug, Clone, Args)]
struct AnalyzeArgs {
    #[arg(long, value_enum, default_value_t = SchemeKind::FourBand)]
    scheme: SchemeKind,

    /// Ascending category boundaries, overrides --scheme.
    #[arg(long, value_delimiter = ',')]
    thresholds: Option<Vec<f64>>,

    #[arg(long, default_value_t = 0.95)]
    confidence: f64,

    /// Report kappa as undefined instead of 0 when expected agreement is 1.
    #[arg(long)]
    undefined_kappa: bool,

    /// Score CSV from `extract`; the built-in dataset is used otherwise.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Also write report.txt, kappa_table.tex and summary.json here.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            scheme: SchemeKind::FourBand,
            thresholds: None,
            confidence: 0.95,
            undefined_kappa: false,
            input: None,
            out: None,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct ExtractArgs {
    #[arg(long)]
    input: PathBuf,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Agreement(#[from] AgreementError),
    #[error(transparent)]
    Scheme(#[from] SchemeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command.unwrap_or(Command::Analyze(AnalyzeArgs::default())) {
        Command::Analyze(args) => {
            let report = run_analyze(&args)?;
            print!("{report}");
        }
        Command::Extract(args) => {
            let rows = extract_file(&args.input, &args.out)?;
            println!("Extracted {} pitches to {}", rows.len(), args.out.display());
        }
    }
    Ok(())
}

fn build_config(args: &AnalyzeArgs) -> Result<AnalysisConfig, CliError> {
    let scheme = match &args.thresholds {
        Some(boundaries) => CategoryScheme::custom(boundaries.clone())?,
        None => CategoryScheme::preset(args.scheme),
    };
    Ok(AnalysisConfig {
        scheme,
        confidence_level: args.confidence,
        degenerate: if args.undefined_kappa {
            DegeneratePolicy::Undefined
        } else {
            DegeneratePolicy::Zero
        },
    })
}

fn analyze_dataset(
    ds: &PitchDataset,
    config: &AnalysisConfig,
) -> Result<Vec<CriterionAnalysis>, CliError> {
    if ds.is_empty() {
        return Err(AgreementError::EmptyInput.into());
    }
    let mut analyses = Vec::new();
    for criterion in ds.criteria() {
        let paired = ds.paired(criterion)?;
        analyses.push(analyze_criterion(&paired, config)?);
    }
    Ok(analyses)
}

/// Runs the analysis, writes files when `--out` is set and returns the
/// console report.
fn run_analyze(args: &AnalyzeArgs) -> Result<String, CliError> {
    let config = build_config(args)?;
    let ds = load_dataset(args.input.as_deref())?;
    let analyses = analyze_dataset(&ds, &config)?;

    if ds.len() < SMALL_SAMPLE_N {
        tracing::warn!(
            "n = {} is below {}; confidence intervals use the asymptotic standard error and are approximate",
            ds.len(),
            SMALL_SAMPLE_N
        );
    }

    let ctx = ReportContext {
        tool_name: TOOL_NAME.to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        dataset_source: ds.source.clone(),
        n_pitches: ds.len(),
        scheme: &config.scheme,
        confidence_level: config.confidence_level,
        degenerate: config.degenerate,
        analyses: &analyses,
    };

    if let Some(out_dir) = &args.out {
        write_reports(&ctx, out_dir)?;
    }
    Ok(render_console(&ctx))
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
