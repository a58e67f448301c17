use std::path::Path;

use verity_core::artifact;
use verity_core::error::Result;

use crate::runner::SuiteResults;

/// Write the combined results report: an ordered array of suite results as
/// indented JSON, fully replacing any previous report.
pub fn write_report(suites: &[SuiteResults], path: &Path) -> Result<()> {
    artifact::write_json_pretty(&suites, path)?;
    tracing::info!(path = %path.display(), suites = suites.len(), "results report written");
    Ok(())
}
