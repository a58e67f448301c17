use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{Result, VerityError};

/// Serialize `value` as indented JSON and replace whatever is at `path`.
///
/// Parent directories are created as needed. The write goes through a
/// temp-file-plus-rename so readers never observe a partial artifact.
pub fn write_json_pretty<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, json.as_bytes())
}

/// Atomically replace the file at `path` with `bytes`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| write_err(path, e))?;

    // Temp file must live in the target directory so the rename stays on one
    // filesystem.
    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| write_err(path, e))?;
    tmp.write_all(bytes).map_err(|e| write_err(path, e))?;
    tmp.persist(path).map_err(|e| write_err(path, e.error))?;
    Ok(())
}

fn write_err(path: &Path, source: std::io::Error) -> VerityError {
    VerityError::Write {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json_pretty(&serde_json::json!({"a": 1}), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deeply/nested/out.json");
        write_json_pretty(&serde_json::json!([]), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_json_pretty(&serde_json::json!({"run": 1}), &path).unwrap();
        write_json_pretty(&serde_json::json!({"run": 2}), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"run\": 2"));
        assert!(!content.contains("\"run\": 1"));
    }

    #[test]
    fn write_failure_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory at the target path makes the rename fail.
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();

        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, VerityError::Write { .. }));
        assert!(err.to_string().contains("occupied"));
    }
}
