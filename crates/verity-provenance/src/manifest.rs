use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use verity_core::artifact;
use verity_core::error::Result;

use crate::hasher::hash_file;

/// Content files tracked by default.
pub const DEFAULT_ROOTS: &[&str] = &[
    "content/casestudies/incident-copilot.mdx",
    "content/casestudies/eval-first-rag.mdx",
];

/// Default manifest output path.
pub const DEFAULT_MANIFEST_PATH: &str = "public/provenance/index.json";

/// One hashed file: POSIX-style relative path plus hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    pub sha256: String,
}

/// Integrity index over a set of content files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// ISO-8601 timestamp, captured once per invocation.
    pub generated_at: String,
    pub entries: Vec<ManifestEntry>,
}

/// Hash every existing path under `root`, in the given order.
///
/// Paths that do not exist on disk are silently excluded; the filter runs
/// before any hashing so a missing file never aborts the manifest.
pub fn build_manifest(root: &Path, paths: &[PathBuf]) -> Result<Manifest> {
    let mut entries = Vec::new();
    for rel in paths {
        let full = if rel.is_absolute() {
            rel.clone()
        } else {
            root.join(rel)
        };
        if !full.exists() {
            continue;
        }
        let sha256 = hash_file(&full)?;
        let display = full.strip_prefix(root).unwrap_or(&full);
        entries.push(ManifestEntry {
            path: posix_path(display),
            sha256,
        });
    }

    Ok(Manifest {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        entries,
    })
}

/// Write the manifest as indented JSON, replacing any previous one.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    artifact::write_json_pretty(manifest, path)?;
    tracing::info!(
        path = %path.display(),
        entries = manifest.entries.len(),
        "provenance manifest written"
    );
    Ok(())
}

fn posix_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
