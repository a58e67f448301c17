use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the Verity harness.
#[derive(Debug, Error)]
pub enum VerityError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Response failed for case '{case}': {reason}")]
    Response { case: String, reason: String },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Malformed case in '{dataset}' at line {line}: {reason}")]
    Malformed {
        dataset: String,
        line: usize,
        reason: String,
    },

    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, VerityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_not_found_display() {
        let err = DatasetError::NotFound {
            path: PathBuf::from("evals/datasets/missing.jsonl"),
        };
        assert_eq!(
            err.to_string(),
            "Dataset not found: evals/datasets/missing.jsonl"
        );
    }

    #[test]
    fn malformed_display_includes_line() {
        let err = DatasetError::Malformed {
            dataset: "rag-basics".into(),
            line: 3,
            reason: "missing field `id`".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("rag-basics"));
        assert!(msg.contains("line 3"));
        assert!(msg.contains("missing field `id`"));
    }

    #[test]
    fn verity_error_from_dataset_error() {
        let ds_err = DatasetError::NotFound {
            path: PathBuf::from("x.jsonl"),
        };
        let err: VerityError = ds_err.into();
        assert!(matches!(err, VerityError::Dataset(DatasetError::NotFound { .. })));
        assert!(err.to_string().contains("x.jsonl"));
    }

    #[test]
    fn verity_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: VerityError = serde_err.into();
        assert!(matches!(err, VerityError::Serialization(_)));
    }

    #[test]
    fn response_error_display() {
        let err = VerityError::Response {
            case: "test-1".into(),
            reason: "backend unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "Response failed for case 'test-1': backend unavailable"
        );
    }

    #[test]
    fn write_error_display() {
        let err = VerityError::Write {
            path: PathBuf::from("public/evals-results.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("public/evals-results.json"));
    }
}
