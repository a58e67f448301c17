use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Dataset run when the CLI is invoked without positional dataset names.
pub const DEFAULT_DATASET: &str = "rag-basics";

/// What to do when a dataset line fails JSON parsing or shape validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Abort the whole run on the first bad line (default).
    #[default]
    FailFast,
    /// Skip bad lines, counting them on the loaded dataset.
    Skip,
}

/// Configuration for an evaluation run.
///
/// Owned by the entry point: built once at process start and passed by
/// reference into the runner. `started_at` is captured at construction and
/// read-only thereafter.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory containing `<name>.jsonl` dataset files.
    pub datasets_dir: PathBuf,
    /// Path the combined results report is written to.
    pub report_path: PathBuf,
    /// Log individual case results, with expected-vs-actual on failure.
    pub verbose: bool,
    /// Policy for malformed dataset lines.
    pub malformed: MalformedPolicy,
    started_at: Instant,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            datasets_dir: PathBuf::from("evals/datasets"),
            report_path: PathBuf::from("public/evals-results.json"),
            verbose: false,
            malformed: MalformedPolicy::FailFast,
            started_at: Instant::now(),
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_datasets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.datasets_dir = dir.into();
        self
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }

    /// Resolve a dataset name to its `.jsonl` path under `datasets_dir`.
    pub fn dataset_path(&self, name: &str) -> PathBuf {
        self.datasets_dir.join(format!("{name}.jsonl"))
    }

    /// Time elapsed since this configuration was built at process start.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
