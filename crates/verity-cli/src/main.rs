//! Verity CLI.
//!
//! - `verity run [DATASETS]...`: execute evaluation suites from JSONL
//!   datasets and write the combined results report. Exits non-zero when
//!   any suite has failing cases.
//! - `verity provenance [PATHS]...`: hash content files and write the
//!   provenance manifest.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use verity_core::config::{DEFAULT_DATASET, MalformedPolicy, RunConfig};
use verity_core::error::Result;
use verity_eval::report::write_report;
use verity_eval::runner::EvalRunner;
use verity_provenance::manifest::{
    DEFAULT_MANIFEST_PATH, DEFAULT_ROOTS, build_manifest, write_manifest,
};

#[derive(Parser)]
#[command(name = "verity")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Deterministic evaluation harness with content provenance", long_about = None)]
struct Cli {
    /// Log individual case results, with expected-vs-actual on failure
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run evaluation suites from JSONL datasets
    Run {
        /// Dataset names, without the .jsonl extension
        #[arg(default_values_t = [DEFAULT_DATASET.to_string()])]
        datasets: Vec<String>,

        /// Directory containing dataset files
        #[arg(long, default_value = "evals/datasets")]
        datasets_dir: PathBuf,

        /// Report output path
        #[arg(short, long, default_value = "public/evals-results.json")]
        output: PathBuf,

        /// Skip and count malformed dataset lines instead of aborting
        #[arg(long)]
        skip_malformed: bool,
    },

    /// Hash content files and write the provenance manifest
    Provenance {
        /// Files to hash, relative to the current directory
        paths: Vec<PathBuf>,

        /// Manifest output path
        #[arg(short, long, default_value = DEFAULT_MANIFEST_PATH)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verity=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            tracing::error!("some evaluation cases failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the invocation fully passed.
async fn dispatch(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Run {
            datasets,
            datasets_dir,
            output,
            skip_malformed,
        } => {
            let config = RunConfig::new()
                .with_datasets_dir(datasets_dir)
                .with_report_path(output)
                .with_verbose(cli.verbose)
                .with_malformed_policy(if skip_malformed {
                    MalformedPolicy::Skip
                } else {
                    MalformedPolicy::FailFast
                });

            let runner = EvalRunner::with_keyword_responder();
            let suites = runner.run_many(&datasets, &config).await?;

            // The report is written even when suites have failing cases;
            // only the exit status reflects the failure.
            write_report(&suites, &config.report_path)?;

            Ok(suites.iter().all(|s| !s.has_failures()))
        }
        Commands::Provenance { paths, output } => {
            let root = std::env::current_dir()?;
            let paths = if paths.is_empty() {
                DEFAULT_ROOTS.iter().map(PathBuf::from).collect()
            } else {
                paths
            };

            let manifest = build_manifest(&root, &paths)?;
            write_manifest(&manifest, &output)?;
            Ok(true)
        }
    }
}
