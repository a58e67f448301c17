use serde::{Deserialize, Serialize};

use crate::dataset::EvalCase;

/// Outcome of running one case through the responder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalResult {
    pub id: String,
    pub pass: bool,
    pub output: String,
    /// Wall-clock duration of the respond call, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<u64>,
    /// Reserved for backends that report token usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
}

/// Pure pass/fail decision for one case.
///
/// A case without `expected` passes unconditionally (vacuous success);
/// otherwise the check is case-insensitive substring containment.
pub fn score_case(case: &EvalCase, output: &str) -> bool {
    match &case.expected {
        Some(expected) => output.to_lowercase().contains(&expected.to_lowercase()),
        None => true,
    }
}
