use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use verity_core::config::RunConfig;
use verity_core::error::Result;

use crate::dataset::Dataset;
use crate::report::write_report;
use crate::responder::{KeywordResponder, Responder};
use crate::score::{EvalResult, score_case};

/// Aggregate pass/fail statistics for one suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage in [0, 100].
    pub pass_rate: f64,
}

impl SuiteSummary {
    pub fn from_results(results: &[EvalResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.pass).count();
        let failed = total - passed;
        // An empty suite has no failures, so report it as fully passing
        // instead of dividing by zero.
        let pass_rate = if total == 0 {
            100.0
        } else {
            passed as f64 / total as f64 * 100.0
        };
        Self {
            total,
            passed,
            failed,
            pass_rate,
        }
    }
}

/// One suite execution: results in input order plus summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResults {
    /// Run timestamp, milliseconds since the Unix epoch.
    pub ts: i64,
    pub suite: String,
    pub results: Vec<EvalResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SuiteSummary>,
}

impl SuiteResults {
    pub fn has_failures(&self) -> bool {
        self.summary.as_ref().is_some_and(|s| s.failed > 0)
    }
}

/// Executes datasets against a responder, sequentially and in input order.
pub struct EvalRunner {
    responder: Box<dyn Responder>,
}

impl EvalRunner {
    pub fn new(responder: impl Responder + 'static) -> Self {
        Self {
            responder: Box::new(responder),
        }
    }

    /// Runner backed by the deterministic keyword mock.
    pub fn with_keyword_responder() -> Self {
        Self::new(KeywordResponder::new())
    }

    /// Run every case of `dataset` in file order and aggregate the results.
    pub async fn run_suite(&self, dataset: &Dataset, verbose: bool) -> Result<SuiteResults> {
        tracing::info!(
            suite = %dataset.name,
            cases = dataset.len(),
            backend = self.responder.name(),
            "running evaluation suite"
        );

        let mut results = Vec::with_capacity(dataset.len());
        for case in &dataset.cases {
            let start = Instant::now();
            let output = self.responder.respond(&case.input).await?;
            let latency = start.elapsed().as_millis() as u64;

            let pass = score_case(case, &output);
            if verbose {
                if pass {
                    tracing::info!(case = %case.id, "PASS");
                } else {
                    tracing::warn!(
                        case = %case.id,
                        expected = case.expected.as_deref().unwrap_or(""),
                        got = %output,
                        "FAIL"
                    );
                }
            }

            results.push(EvalResult {
                id: case.id.clone(),
                pass,
                output,
                latency: Some(latency),
                token_count: None,
            });
        }

        let summary = SuiteSummary::from_results(&results);
        tracing::info!(
            suite = %dataset.name,
            passed = summary.passed,
            failed = summary.failed,
            pass_rate = format_args!("{:.1}%", summary.pass_rate),
            "suite finished"
        );

        Ok(SuiteResults {
            ts: Utc::now().timestamp_millis(),
            suite: dataset.name.clone(),
            results,
            summary: Some(summary),
        })
    }

    /// Load a dataset by name per `config` and run it.
    pub async fn run_suite_by_name(&self, name: &str, config: &RunConfig) -> Result<SuiteResults> {
        let dataset = Dataset::load(name, &config.datasets_dir, config.malformed)?;
        self.run_suite(&dataset, config.verbose).await
    }

    /// Run each named dataset in invocation order.
    ///
    /// If a suite fails mid-run, the suites that already completed are
    /// flushed to the report path before the error propagates, so a broken
    /// dataset does not discard earlier results.
    pub async fn run_many(
        &self,
        names: &[String],
        config: &RunConfig,
    ) -> Result<Vec<SuiteResults>> {
        let mut completed = Vec::with_capacity(names.len());
        for name in names {
            match self.run_suite_by_name(name, config).await {
                Ok(suite) => completed.push(suite),
                Err(err) => {
                    if !completed.is_empty() {
                        if let Err(write_err) = write_report(&completed, &config.report_path) {
                            tracing::warn!(%write_err, "could not flush partial results");
                        }
                    }
                    return Err(err);
                }
            }
        }
        Ok(completed)
    }
}
