use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use verity_core::config::MalformedPolicy;
use verity_core::error::{DatasetError, Result};

/// A single test case: one prompt and, optionally, a required substring of
/// the expected response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    /// Unique identifier within the dataset.
    pub id: String,
    /// Input prompt fed to the responder.
    pub input: String,
    /// Expected keyword; when absent the case passes unconditionally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

/// A named collection of test cases, loaded from a JSONL file.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub cases: Vec<EvalCase>,
    /// Malformed lines dropped under [`MalformedPolicy::Skip`]; always 0
    /// under the fail-fast default.
    pub skipped: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Parse JSONL text: one `EvalCase` per non-empty line, in file order.
    pub fn from_json_lines(
        name: impl Into<String>,
        text: &str,
        policy: MalformedPolicy,
    ) -> std::result::Result<Self, DatasetError> {
        let name = name.into();
        let mut cases = Vec::new();
        let mut skipped = 0;

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<EvalCase>(line) {
                Ok(case) => cases.push(case),
                Err(err) => match policy {
                    MalformedPolicy::FailFast => {
                        return Err(DatasetError::Malformed {
                            dataset: name,
                            line: idx + 1,
                            reason: err.to_string(),
                        });
                    }
                    MalformedPolicy::Skip => {
                        tracing::warn!(
                            dataset = %name,
                            line = idx + 1,
                            %err,
                            "skipping malformed dataset line"
                        );
                        skipped += 1;
                    }
                },
            }
        }

        Ok(Self {
            name,
            cases,
            skipped,
        })
    }

    /// Load `<dir>/<name>.jsonl`. An absent file is a [`DatasetError::NotFound`]
    /// carrying the resolved path.
    pub fn load(name: &str, dir: &Path, policy: MalformedPolicy) -> Result<Self> {
        let path = dir.join(format!("{name}.jsonl"));
        if !path.exists() {
            return Err(DatasetError::NotFound { path }.into());
        }
        let text = fs::read_to_string(&path)
            .map_err(|source| DatasetError::Read { path, source })?;
        Ok(Self::from_json_lines(name, &text, policy)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"id": "t1", "input": "what is rag?", "expected": "retrieval"}
{"id": "t2", "input": "hello"}
"#;

    #[test]
    fn parse_valid_lines() {
        let ds = Dataset::from_json_lines("basics", VALID, MalformedPolicy::FailFast).unwrap();
        assert_eq!(ds.name, "basics");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.skipped, 0);
        assert_eq!(ds.cases[0].id, "t1");
        assert_eq!(ds.cases[0].expected.as_deref(), Some("retrieval"));
        assert_eq!(ds.cases[1].expected, None);
    }

    #[test]
    fn preserves_file_order() {
        let text = r#"{"id": "c", "input": "x"}
{"id": "a", "input": "y"}
{"id": "b", "input": "z"}"#;
        let ds = Dataset::from_json_lines("ordered", text, MalformedPolicy::FailFast).unwrap();
        let ids: Vec<_> = ds.cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let text = "{\"id\": \"t1\", \"input\": \"x\"}\n\n{\"id\": \"t2\", \"input\": \"y\"}\n\n";
        let ds = Dataset::from_json_lines("blanks", text, MalformedPolicy::FailFast).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn fail_fast_reports_line_number() {
        let text = "{\"id\": \"t1\", \"input\": \"x\"}\nnot json\n";
        let err =
            Dataset::from_json_lines("bad", text, MalformedPolicy::FailFast).unwrap_err();
        match err {
            DatasetError::Malformed { dataset, line, .. } => {
                assert_eq!(dataset, "bad");
                assert_eq!(line, 2);
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn fail_fast_on_shape_violation() {
        // Parses as JSON but is missing the required `input` field.
        let text = "{\"id\": \"t1\"}\n";
        let err =
            Dataset::from_json_lines("shape", text, MalformedPolicy::FailFast).unwrap_err();
        assert!(matches!(err, DatasetError::Malformed { line: 1, .. }));
    }

    #[test]
    fn skip_policy_counts_malformed() {
        let text = "{\"id\": \"t1\", \"input\": \"x\"}\nnot json\n{\"id\": \"t2\", \"input\": \"y\"}\n";
        let ds = Dataset::from_json_lines("skippy", text, MalformedPolicy::Skip).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.skipped, 1);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load("absent", dir.path(), MalformedPolicy::FailFast).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("absent.jsonl"), "unexpected message: {msg}");
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("smoke.jsonl"), VALID).unwrap();

        let ds = Dataset::load("smoke", dir.path(), MalformedPolicy::FailFast).unwrap();
        assert_eq!(ds.name, "smoke");
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let text = "{\"id\": \"t1\", \"input\": \"x\", \"tags\": [\"extra\"]}\n";
        let ds = Dataset::from_json_lines("extra", text, MalformedPolicy::FailFast).unwrap();
        assert_eq!(ds.len(), 1);
    }
}
