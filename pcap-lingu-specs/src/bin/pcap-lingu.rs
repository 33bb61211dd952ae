//! Batch driver: runs every sentence fixture in a directory through the
//! extraction pipeline and reports per-sentence failures.

use clap::Parser;
use pcap_lingu::{ClausesDisplay, Pipeline, PipelineConfig, TreeDisplay, TreeTableDisplay};
use pcap_lingu_specs::{
    format_broken, format_failure, format_summary, load_all_fixtures, run_all, ExpectedFailures,
    FailureState, EXPECTED_FAILURES_FILE,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Extract filter clauses from pre-annotated sentences
#[derive(Parser, Debug)]
#[command(name = "pcap-lingu")]
#[command(about = "Extract filter clauses from pre-annotated sentence fixtures")]
struct Args {
    /// Directory of sentence fixtures (searched recursively for *.toml)
    #[arg(long, default_value = "fixtures")]
    fixtures: PathBuf,

    /// Pipeline configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Expected failures file (default: <fixtures>/expected-failures.toml)
    #[arg(long)]
    expected_failures: Option<PathBuf>,

    /// Output one JSON object per sentence
    #[arg(long)]
    json: bool,

    /// Show the dependency tree and extracted clauses for each sentence
    #[arg(long)]
    tree: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(message) => {
            eprintln!("ERROR: {}", message);
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, String> {
    let config = match &args.config {
        Some(path) => PipelineConfig::from_path(path).map_err(|e| e.to_string())?,
        None => PipelineConfig::default(),
    };
    let pipeline = Pipeline::new(config);

    let expected_path = args
        .expected_failures
        .clone()
        .unwrap_or_else(|| args.fixtures.join(EXPECTED_FAILURES_FILE));
    let expected = ExpectedFailures::load(&expected_path).map_err(|e| e.to_string())?;
    info!(count = expected.count(), path = %expected_path.display(), "loaded expected failures");

    let fixtures = load_all_fixtures(&args.fixtures).map_err(|e| e.to_string())?;
    info!(count = fixtures.len(), dir = %args.fixtures.display(), "loaded fixtures");
    if fixtures.is_empty() {
        return Err(format!("no fixtures found in {}", args.fixtures.display()));
    }

    let run = run_all(&fixtures, &pipeline, &expected);

    for ((_, fixture), report) in fixtures.iter().zip(&run.reports) {
        match &report.outcome {
            Ok(outcome) => {
                if args.json {
                    let line = serde_json::to_string(outcome).map_err(|e| e.to_string())?;
                    println!("{}", line);
                } else if args.tree {
                    println!("\n== {} ==", report.name);
                    println!("{}", TreeTableDisplay::new(&outcome.graph));
                    println!();
                    println!("{}", TreeDisplay::new(&outcome.graph));
                    if let Some(analysis) = &outcome.analysis {
                        println!();
                        println!("{}", ClausesDisplay::new(&outcome.graph, &analysis.clauses));
                        println!("negations: {}", analysis.negation_count);
                    }
                }
                if !outcome.passed() {
                    eprint!(
                        "{}",
                        format_failure(&report.name, fixture, outcome, &report.states, &expected)
                    );
                }
            }
            Err(e) => {
                let state = report.states.first().copied().unwrap_or(FailureState::Regression);
                eprint!("{}", format_broken(&report.name, e, state));
            }
        }
    }

    let result = &run.result;
    eprint!(
        "{}",
        format_summary(
            &args.fixtures.display().to_string(),
            result.passed,
            result.failed(),
            result.expected_failures,
            result.regressions,
        )
    );

    Ok(ExitCode::from(result.exit_code() as u8))
}
