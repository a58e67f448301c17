use async_trait::async_trait;

use verity_core::error::Result;

/// Pluggable response function: given an input prompt, asynchronously
/// produce an output string. Production backends may suspend on network
/// I/O; the reference implementation resolves instantly.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Name of this backend, for logging.
    fn name(&self) -> &str;

    /// Produce a response for `input`.
    async fn respond(&self, input: &str) -> Result<String>;
}

/// One keyword-match rule: fires when any keyword occurs in the lowercased
/// input.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    keywords: Vec<String>,
    reply: String,
}

impl KeywordRule {
    pub fn new(keywords: &[&str], reply: impl Into<String>) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            reply: reply.into(),
        }
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    fn matches(&self, lower_input: &str) -> bool {
        self.keywords.iter().any(|k| lower_input.contains(k.as_str()))
    }
}

/// Maximum length, in characters, of the fallback reply when no rule fires.
pub const FALLBACK_PREFIX_LEN: usize = 120;

/// Deterministic keyword-matched responder.
///
/// Rules are evaluated in order, first match wins; the ordering runs from
/// most specific to most general and is part of the recorded-results
/// format, so changing it invalidates previously written reports. Unmatched
/// input falls back to a truncated prefix of the prompt.
pub struct KeywordResponder {
    rules: Vec<KeywordRule>,
}

impl KeywordResponder {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    pub fn with_rules(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Default for KeywordResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for KeywordResponder {
    fn name(&self) -> &str {
        "keyword-mock"
    }

    async fn respond(&self, input: &str) -> Result<String> {
        let lower = input.to_lowercase();
        for rule in &self.rules {
            if rule.matches(&lower) {
                return Ok(rule.reply.clone());
            }
        }
        Ok(truncate_chars(input, FALLBACK_PREFIX_LEN))
    }
}

/// The canned response table, most specific patterns first.
fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            &["on-chain"],
            "On-chain verification provides immutable proof that artifacts existed at specific points in time, with cryptographic guarantees and tamper-evidence.",
        ),
        KeywordRule::new(
            &["immutable", "audit"],
            "Immutable audit trails are permanent records that cannot be altered after creation, providing accountability and provenance tracking.",
        ),
        KeywordRule::new(
            &["blockchain", "anchoring"],
            "Blockchain anchoring works by storing cryptographic hashes of build artifacts on-chain, creating tamper-proof timestamps.",
        ),
        KeywordRule::new(
            &["cryptographic", "provenance"],
            "Cryptographic provenance uses digital signatures and hash functions to create immutable audit trails for software artifacts.",
        ),
        KeywordRule::new(
            &["disaster", "recovery"],
            "Disaster recovery practices include automated backups, geo-redundant storage, infrastructure-as-code, and documented runbooks.",
        ),
        KeywordRule::new(
            &["rag", "tools"],
            "RAG systems use retrieval algorithms, vector databases, embedding models, and relevance ranking to find and return context for language models.",
        ),
        KeywordRule::new(
            &["accuracy", "measure"],
            "LLM accuracy is measured using evaluation datasets with ground truth labels, comparing outputs against expected results with metrics.",
        ),
        KeywordRule::new(
            &["evaluation", "harness"],
            "Evaluation harnesses provide automated testing frameworks that validate implementations against predefined success criteria continuously.",
        ),
        KeywordRule::new(
            &["test", "difference"],
            "Unit tests validate individual components, while evaluation suites assess entire systems against real-world scenarios and metrics.",
        ),
        KeywordRule::new(
            &["verification"],
            "Verification-first development is an approach where success criteria and evaluation harnesses are defined before implementation.",
        ),
    ]
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
